//! Format discrimination and layout resolution
//!
//! The primary header is four magic bytes plus one 32-bit offset. What
//! that offset means depends on the magic:
//!
//! - `ACSE` / `ACSe`: it points at the chunk region;
//! - `ACS\0`: it points at the script directory -- unless the file is an
//!   indirect chunked file in disguise, in which case the *real* header
//!   sits reversed just below the fake directory: format bytes at
//!   `offset - 4`, preceded by the 32-bit chunk-region offset.

use acsdump_spec::{
    Format, ObjectError, ObjectLayout, Result, ACS0_ENTRY_SIZE, HEADER_SIZE, MAGIC_ACS0,
    MAGIC_ACSE, MAGIC_ACSLE,
};
use log::debug;

use crate::buffer::ObjectBuffer;

/// Classify the object file and establish the offsets of every
/// top-level region.
///
/// Total: either yields a fully populated layout whose offsets are all
/// in range, or fails.
pub fn resolve_layout(buf: &ObjectBuffer) -> Result<ObjectLayout> {
    buf.require_bytes(0, HEADER_SIZE)?;
    let id = buf.read_name(0)?;
    let header_offset = buf.read_i32(4)?;
    // The end-of-file boundary is legal here: a direct chunked file with
    // an empty chunk region points exactly past its own header.
    let directory_offset = buf.require_bound(header_offset as i64)?;

    let mut layout = ObjectLayout {
        format: Format::Zero,
        indirect: false,
        small_code: false,
        directory_offset,
        string_offset: 0,
        chunk_offset: 0,
        real_header_offset: 0,
    };

    if id == MAGIC_ACSE || id == MAGIC_ACSLE {
        layout.format = if id[3] == b'E' {
            Format::BigE
        } else {
            Format::LittleE
        };
        layout.chunk_offset = directory_offset;
    } else if id == MAGIC_ACS0 {
        if let Some(real) = probe_real_header(buf, directory_offset)? {
            layout.format = real.format;
            layout.chunk_offset = real.chunk_offset;
            layout.real_header_offset = real.header_offset;
            layout.indirect = true;
        }
    } else {
        return Err(ObjectError::UnsupportedFormat);
    }

    layout.small_code = layout.format == Format::LittleE;

    if layout.has_directory() {
        let total_scripts = buf.read_i32(layout.directory_offset)?;
        if total_scripts < 0 {
            return Err(ObjectError::NegativeCount {
                what: "script count",
            });
        }
        let string_offset = layout.directory_offset as i64
            + 4
            + total_scripts as i64 * ACS0_ENTRY_SIZE as i64;
        layout.string_offset = buf.require_bound(string_offset)?;
    }

    debug!(
        "resolved {} (indirect={}, chunk_offset={}, directory_offset={})",
        layout.format.name(),
        layout.indirect,
        layout.chunk_offset,
        layout.directory_offset
    );
    Ok(layout)
}

struct RealHeader {
    format: Format,
    chunk_offset: u32,
    header_offset: u32,
}

/// An ACS0 header might be a disguise. Probe for format bytes just below
/// the directory offset; once they match, every further violation is an
/// error rather than a fallback to ACS0.
fn probe_real_header(buf: &ObjectBuffer, directory_offset: u32) -> Result<Option<RealHeader>> {
    let probe = directory_offset as i64 - 4;
    if !buf.offset_in_file(probe) {
        return Ok(None);
    }
    let id = buf.read_name(probe as u32)?;
    let format = if id == MAGIC_ACSE {
        Format::BigE
    } else if id == MAGIC_ACSLE {
        Format::LittleE
    } else {
        return Ok(None);
    };
    let slot = buf.require_offset(probe - 4)?;
    let chunk_offset = buf.read_i32(slot)?;
    let chunk_offset = buf.require_offset(chunk_offset as i64)?;
    if chunk_offset > slot {
        return Err(ObjectError::BadLayout {
            reason: "chunk region begins after the real header",
        });
    }
    Ok(Some(RealHeader {
        format,
        chunk_offset,
        header_offset: slot,
    }))
}
