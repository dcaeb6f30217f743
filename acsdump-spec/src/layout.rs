//! Resolved layout of an object file

use serde::{Deserialize, Serialize};

/// Container variant of an object file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    /// The original flat ACS0 layout.
    Zero,
    /// Chunked container with wide bytecode ("ACSE").
    BigE,
    /// Chunked container with compact bytecode ("ACSe").
    LittleE,
}

impl Format {
    /// Display name, as printed in the `format:` header line.
    pub fn name(self) -> &'static str {
        match self {
            Format::Zero => "ACS0",
            Format::BigE => "ACSE",
            Format::LittleE => "ACSe",
        }
    }

    /// True for the chunk-bearing containers.
    pub fn is_chunked(self) -> bool {
        matches!(self, Format::BigE | Format::LittleE)
    }
}

/// Layout descriptor produced by the format resolver.
///
/// Offset validity rules:
/// - `directory_offset` and `string_offset` are meaningful only when
///   [`ObjectLayout::has_directory`] holds;
/// - `chunk_offset` is meaningful only for chunked formats;
/// - `real_header_offset` is meaningful only when `indirect`.
///
/// A direct chunked file may carry `chunk_offset == file size`, which
/// denotes an empty chunk region. Every other populated offset lies
/// strictly inside the file.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ObjectLayout {
    pub format: Format,
    /// The real header is hidden behind an ACS0 disguise.
    pub indirect: bool,
    /// Bytecode uses the compact encoding (true iff `format` is ACSe).
    pub small_code: bool,
    pub directory_offset: u32,
    pub string_offset: u32,
    pub chunk_offset: u32,
    pub real_header_offset: u32,
}

impl ObjectLayout {
    /// Script and string directories are present in ACS0 files and in
    /// indirect chunked files, which are also valid ACS0 files.
    pub fn has_directory(&self) -> bool {
        self.format == Format::Zero || self.indirect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names() {
        assert_eq!(Format::Zero.name(), "ACS0");
        assert_eq!(Format::BigE.name(), "ACSE");
        assert_eq!(Format::LittleE.name(), "ACSe");
    }

    #[test]
    fn test_chunked() {
        assert!(!Format::Zero.is_chunked());
        assert!(Format::BigE.is_chunked());
        assert!(Format::LittleE.is_chunked());
    }

    #[test]
    fn test_directory_presence() {
        let mut layout = ObjectLayout {
            format: Format::BigE,
            indirect: false,
            small_code: false,
            directory_offset: 0,
            string_offset: 0,
            chunk_offset: 8,
            real_header_offset: 0,
        };
        assert!(!layout.has_directory());

        layout.indirect = true;
        assert!(layout.has_directory());

        layout.format = Format::Zero;
        layout.indirect = false;
        assert!(layout.has_directory());
    }
}
