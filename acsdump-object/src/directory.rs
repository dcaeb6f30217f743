//! ACS0 script and string directories
//!
//! Count-prefixed tables present in ACS0 files and in indirect chunked
//! files (whose directories exist to satisfy old wad-editing tools).

use acsdump_spec::{ObjectError, ObjectLayout, Result};
use serde::{Deserialize, Serialize};

use crate::buffer::ObjectBuffer;

/// One 12-byte script-directory entry. The number field packs the
/// activation type and the user-visible number as `type * 1000 +
/// number`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Acs0ScriptEntry {
    pub number: i32,
    pub offset: i32,
    pub num_param: i32,
}

impl Acs0ScriptEntry {
    pub fn user_number(&self) -> i32 {
        self.number % 1000
    }

    pub fn stype(&self) -> i32 {
        self.number / 1000
    }
}

/// Read the script directory at `layout.directory_offset`.
pub fn read_script_directory(
    buf: &ObjectBuffer,
    layout: &ObjectLayout,
) -> Result<Vec<Acs0ScriptEntry>> {
    let mut pos = layout.directory_offset;
    let count = buf.read_i32(pos)?;
    if count < 0 {
        return Err(ObjectError::NegativeCount {
            what: "script count",
        });
    }
    pos += 4;
    let mut entries = Vec::with_capacity(count as usize);
    for _ in 0..count {
        entries.push(Acs0ScriptEntry {
            number: buf.read_i32(pos)?,
            offset: buf.read_i32(pos + 4)?,
            num_param: buf.read_i32(pos + 8)?,
        });
        pos += 12;
    }
    Ok(entries)
}

/// Read the string directory at `layout.string_offset`; the entries are
/// absolute file offsets.
pub fn read_string_directory(buf: &ObjectBuffer, layout: &ObjectLayout) -> Result<Vec<i32>> {
    let mut pos = layout.string_offset;
    let count = buf.read_i32(pos)?;
    if count < 0 {
        return Err(ObjectError::NegativeCount {
            what: "string count",
        });
    }
    pos += 4;
    let mut offsets = Vec::with_capacity(count as usize);
    for _ in 0..count {
        offsets.push(buf.read_i32(pos)?);
        pos += 4;
    }
    Ok(offsets)
}
