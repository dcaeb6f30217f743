//! Chunk names and tags
//!
//! A chunk is a named region of a chunked (ACSE/ACSe) object file. The
//! four-character name selects one of the recognized layouts; lookup is
//! case-insensitive, and unrecognized names classify as `Unknown`.

use serde::{Deserialize, Serialize};

/// Classifier for the recognized chunk layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChunkTag {
    /// Map-array declarations.
    Aray,
    /// Initializers for one map array.
    Aini,
    /// Imported map arrays.
    Aimp,
    /// String-object tagging (map arrays).
    Astr,
    /// String-object tagging (map variables).
    Mstr,
    /// Per-element tagging for one map array.
    Atag,
    /// Imported modules.
    Load,
    /// Function table.
    Func,
    /// Function names.
    Fnam,
    /// Map-variable initializers.
    Mini,
    /// Imported map variables.
    Mimp,
    /// Exported map variables.
    Mexp,
    /// Script table.
    Sptr,
    /// Script flags.
    Sflg,
    /// Script local-variable count overrides.
    Svct,
    /// Named scripts.
    Snam,
    /// Plain string table.
    Strl,
    /// Obfuscated string table.
    Stre,
    /// Per-script arrays.
    Sary,
    /// Per-function arrays.
    Fary,
    /// Library marker.
    Alib,
    Unknown,
}

impl ChunkTag {
    /// Case-insensitive lookup of a four-character chunk name.
    pub fn from_name(name: &[u8; 4]) -> ChunkTag {
        let mut upper = *name;
        for byte in &mut upper {
            *byte = byte.to_ascii_uppercase();
        }
        match &upper {
            b"ARAY" => ChunkTag::Aray,
            b"AINI" => ChunkTag::Aini,
            b"AIMP" => ChunkTag::Aimp,
            b"ASTR" => ChunkTag::Astr,
            b"MSTR" => ChunkTag::Mstr,
            b"ATAG" => ChunkTag::Atag,
            b"LOAD" => ChunkTag::Load,
            b"FUNC" => ChunkTag::Func,
            b"FNAM" => ChunkTag::Fnam,
            b"MINI" => ChunkTag::Mini,
            b"MIMP" => ChunkTag::Mimp,
            b"MEXP" => ChunkTag::Mexp,
            b"SPTR" => ChunkTag::Sptr,
            b"SFLG" => ChunkTag::Sflg,
            b"SVCT" => ChunkTag::Svct,
            b"SNAM" => ChunkTag::Snam,
            b"STRL" => ChunkTag::Strl,
            b"STRE" => ChunkTag::Stre,
            b"SARY" => ChunkTag::Sary,
            b"FARY" => ChunkTag::Fary,
            b"ALIB" => ChunkTag::Alib,
            _ => ChunkTag::Unknown,
        }
    }
}

/// A materialized chunk: a typed, named slice of the object file.
///
/// Chunks are produced transiently by the chunk walker and never
/// persisted; the body lives in the file buffer at
/// `[data_offset, data_offset + size)`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Chunk {
    pub name: [u8; 4],
    pub data_offset: u32,
    pub size: u32,
    pub tag: ChunkTag,
}

impl Chunk {
    /// File offset of the chunk header (name + size fields).
    pub fn header_offset(&self) -> u32 {
        self.data_offset - crate::CHUNK_HEADER_SIZE
    }

    /// The chunk name as display text.
    pub fn name_str(&self) -> String {
        String::from_utf8_lossy(&self.name).into_owned()
    }
}
