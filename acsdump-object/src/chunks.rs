//! Typed decoders for the recognized chunk layouts
//!
//! One decoder per recognized tag. Decoders parse the chunk body into
//! plain records through the chunk-scoped bounds discipline; rendering
//! the records is the caller's business. All integers are little-endian.

use acsdump_spec::{ObjectError, Result};
use serde::{Deserialize, Serialize};

use crate::scoped::{ChunkReader, ChunkSlice};

/// ARAY: one declaration per map array.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ArrayDecl {
    pub number: i32,
    pub size: i32,
}

pub fn read_aray(slice: &ChunkSlice) -> Result<Vec<ArrayDecl>> {
    let mut reader = slice.reader();
    let mut decls = Vec::new();
    while reader.remaining() > 0 {
        let number = reader.read_i32()?;
        let size = reader.read_i32()?;
        decls.push(ArrayDecl { number, size });
    }
    Ok(decls)
}

/// AINI: initializers for one map array.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArrayInit {
    pub index: i32,
    pub values: Vec<i32>,
}

pub fn read_aini(slice: &ChunkSlice) -> Result<ArrayInit> {
    let index = slice.read_i32(0)?;
    let count = (slice.size() - 4) / 4;
    let mut values = Vec::with_capacity(count as usize);
    for k in 0..count {
        values.push(slice.read_i32(4 + 4 * k)?);
    }
    Ok(ArrayInit { index, values })
}

/// AIMP: one entry per imported map array.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArrayImport {
    pub index: i32,
    pub size: i32,
    pub name: Vec<u8>,
}

pub fn read_aimp(slice: &ChunkSlice) -> Result<Vec<ArrayImport>> {
    let mut reader = slice.reader();
    let count = reader.read_i32()?;
    if count < 0 {
        return Err(ObjectError::NegativeCount {
            what: "import count",
        });
    }
    let mut imports = Vec::new();
    for _ in 0..count {
        let index = reader.read_i32()?;
        let size = reader.read_i32()?;
        let name = reader.read_cstr()?.to_vec();
        imports.push(ArrayImport { index, size, name });
    }
    Ok(imports)
}

/// ASTR and MSTR: indices of objects to be treated as strings.
pub fn read_tagged_indices(slice: &ChunkSlice) -> Result<Vec<i32>> {
    let count = slice.size() / 4;
    let mut indices = Vec::with_capacity(count as usize);
    for k in 0..count {
        indices.push(slice.read_i32(4 * k)?);
    }
    Ok(indices)
}

/// ATAG element tags: integer, string, or function.
pub const ATAG_INTEGER: u8 = 0;
pub const ATAG_STRING: u8 = 1;
pub const ATAG_FUNCTION: u8 = 2;

/// ATAG: per-element tagging for one map array. Only version 0 is
/// decoded; other versions are reported by number.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ArrayTagging {
    Version0 { array_index: i32, tags: Vec<u8> },
    Unsupported { version: u8 },
}

pub fn read_atag(slice: &ChunkSlice) -> Result<ArrayTagging> {
    let version = slice.read_u8(0)?;
    if version != 0 {
        return Ok(ArrayTagging::Unsupported { version });
    }
    let array_index = slice.read_i32(1)?;
    let count = slice.size() - 5;
    let mut tags = Vec::with_capacity(count as usize);
    for k in 0..count {
        tags.push(slice.read_u8(5 + k)?);
    }
    Ok(ArrayTagging::Version0 { array_index, tags })
}

/// LOAD: imported module names, NUL-separated; empty entries are
/// suppressed.
pub fn read_load(slice: &ChunkSlice) -> Result<Vec<Vec<u8>>> {
    let mut names = Vec::new();
    let mut pos: i64 = 0;
    while pos < slice.size() as i64 {
        if slice.read_u8(pos as u32)? != 0 {
            let name = slice.cstr_at(pos)?;
            names.push(name.to_vec());
            pos += name.len() as i64;
        }
        pos += 1;
    }
    Ok(names)
}

/// FUNC: one 8-byte entry per function. `offset == 0` marks an imported
/// function without a body.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FuncEntry {
    pub num_param: u8,
    pub size: u8,
    pub has_return: u8,
    pub padding: u8,
    pub offset: i32,
}

impl FuncEntry {
    pub fn is_imported(&self) -> bool {
        self.offset == 0
    }
}

pub fn read_func(slice: &ChunkSlice) -> Result<Vec<FuncEntry>> {
    let count = slice.size() / 8;
    let mut entries = Vec::with_capacity(count as usize);
    for k in 0..count {
        let base = 8 * k;
        entries.push(FuncEntry {
            num_param: slice.read_u8(base)?,
            size: slice.read_u8(base + 1)?,
            has_return: slice.read_u8(base + 2)?,
            padding: slice.read_u8(base + 3)?,
            offset: slice.read_i32(base + 4)?,
        });
    }
    Ok(entries)
}

/// FNAM and MEXP: a count, a table of chunk-local offsets, and the
/// strings those offsets point at.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NamedEntry {
    pub offset: i32,
    pub name: Vec<u8>,
}

pub fn read_name_table(slice: &ChunkSlice) -> Result<Vec<NamedEntry>> {
    let mut reader = slice.reader();
    let count = reader.read_i32()?;
    if count < 0 {
        return Err(ObjectError::NegativeCount { what: "name count" });
    }
    let mut entries = Vec::new();
    for _ in 0..count {
        let offset = reader.read_i32()?;
        let name = slice.cstr_at(offset as i64)?.to_vec();
        entries.push(NamedEntry { offset, name });
    }
    Ok(entries)
}

/// MINI: initializers for a run of map variables starting at
/// `first_var`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapVarInit {
    pub first_var: i32,
    pub values: Vec<i32>,
}

pub fn read_mini(slice: &ChunkSlice) -> Result<MapVarInit> {
    let first_var = slice.read_i32(0)?;
    let count = slice.size() / 4 - 1;
    let mut values = Vec::with_capacity(count as usize);
    for k in 0..count {
        values.push(slice.read_i32(4 + 4 * k)?);
    }
    Ok(MapVarInit { first_var, values })
}

/// MIMP: imported map variables, streamed to the end of the chunk.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VarImport {
    pub index: i32,
    pub name: Vec<u8>,
}

pub fn read_mimp(slice: &ChunkSlice) -> Result<Vec<VarImport>> {
    let mut reader = slice.reader();
    let mut imports = Vec::new();
    while reader.remaining() > 0 {
        let index = reader.read_i32()?;
        let name = reader.read_cstr()?.to_vec();
        imports.push(VarImport { index, name });
    }
    Ok(imports)
}

/// SPTR: one entry per declared script. Indirect files use a compact
/// 8-byte layout, direct files a 12-byte one; both project onto this
/// record.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ScriptEntry {
    pub number: i32,
    pub stype: i32,
    pub num_param: i32,
    pub offset: i32,
}

/// Read one script-table entry. The layout is keyed on `indirect`, not
/// on the format name.
pub fn read_script_entry(reader: &mut ChunkReader, indirect: bool) -> Result<ScriptEntry> {
    if indirect {
        let number = reader.read_i16()? as i32;
        let stype = reader.read_u8()? as i32;
        let num_param = reader.read_u8()? as i32;
        let offset = reader.read_i32()?;
        Ok(ScriptEntry {
            number,
            stype,
            num_param,
            offset,
        })
    } else {
        let number = reader.read_i16()? as i32;
        let stype = reader.read_i16()? as i32;
        let offset = reader.read_i32()?;
        let num_param = reader.read_i32()?;
        Ok(ScriptEntry {
            number,
            stype,
            num_param,
            offset,
        })
    }
}

pub fn read_sptr(slice: &ChunkSlice, indirect: bool) -> Result<Vec<ScriptEntry>> {
    let mut reader = slice.reader();
    let mut entries = Vec::new();
    while reader.remaining() > 0 {
        entries.push(read_script_entry(&mut reader, indirect)?);
    }
    Ok(entries)
}

/// SFLG: script flag words.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ScriptFlags {
    pub number: i16,
    pub flags: u16,
}

pub fn read_sflg(slice: &ChunkSlice) -> Result<Vec<ScriptFlags>> {
    let mut reader = slice.reader();
    let mut entries = Vec::new();
    while reader.remaining() > 0 {
        let number = reader.read_i16()?;
        let flags = reader.read_u16()?;
        entries.push(ScriptFlags { number, flags });
    }
    Ok(entries)
}

/// SVCT: local-variable count overrides.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct VarCountOverride {
    pub number: i16,
    pub new_size: i16,
}

pub fn read_svct(slice: &ChunkSlice) -> Result<Vec<VarCountOverride>> {
    let mut reader = slice.reader();
    let mut entries = Vec::new();
    while reader.remaining() > 0 {
        let number = reader.read_i16()?;
        let new_size = reader.read_i16()?;
        entries.push(VarCountOverride { number, new_size });
    }
    Ok(entries)
}

/// SNAM: named scripts. Names are assigned numbers -1, -2, ... in table
/// order.
pub fn read_snam(slice: &ChunkSlice) -> Result<Vec<Vec<u8>>> {
    let mut reader = slice.reader();
    let count = reader.read_i32()?;
    if count < 0 {
        return Err(ObjectError::NegativeCount { what: "name count" });
    }
    let mut names = Vec::new();
    for _ in 0..count {
        let offset = reader.read_i32()?;
        names.push(slice.cstr_at(offset as i64)?.to_vec());
    }
    Ok(names)
}

/// STRL and STRE: a string table. The header carries two opaque 4-byte
/// fields around the count; both are dropped.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StringEntry {
    pub offset: i32,
    pub value: Vec<u8>,
}

pub fn read_string_table(slice: &ChunkSlice, encoded: bool) -> Result<Vec<StringEntry>> {
    let mut reader = slice.reader();
    let _ = reader.read_i32()?;
    let count = reader.read_i32()?;
    let _ = reader.read_i32()?;
    if count < 0 {
        return Err(ObjectError::NegativeCount {
            what: "string count",
        });
    }
    let mut entries = Vec::new();
    for _ in 0..count {
        let offset = reader.read_i32()?;
        let value = if encoded {
            decode_string(slice, offset)?
        } else {
            slice.cstr_at(offset as i64)?.to_vec()
        };
        entries.push(StringEntry { offset, value });
    }
    Ok(entries)
}

/// De-obfuscate one STRE string stored at chunk-local `offset`. Byte `k`
/// is XORed with the low byte of `offset * 157135 + k/2` (wrapping
/// 32-bit arithmetic); the terminator is found on the *decoded* bytes
/// and must occur before the chunk ends.
pub fn decode_string(slice: &ChunkSlice, offset: i32) -> Result<Vec<u8>> {
    if offset < 0 || offset as i64 >= slice.size() as i64 {
        return Err(ObjectError::OffsetOutOfRange {
            offset: slice.abs(0) as i64 + offset as i64,
        });
    }
    let rel = offset as u32;
    let mut decoded = Vec::new();
    let mut k: u32 = 0;
    loop {
        if rel as i64 + k as i64 >= slice.size() as i64 {
            return Err(ObjectError::UnterminatedString {
                offset: slice.abs(rel),
            });
        }
        let key = offset.wrapping_mul(157135).wrapping_add((k / 2) as i32);
        let byte = slice.read_u8(rel + k)? ^ key as u8;
        if byte == 0 {
            return Ok(decoded);
        }
        decoded.push(byte);
        k += 1;
    }
}

/// SARY and FARY: sizes of the arrays belonging to one script or
/// function.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocalArrays {
    pub owner: i16,
    pub sizes: Vec<i32>,
}

pub fn read_local_arrays(slice: &ChunkSlice) -> Result<LocalArrays> {
    let owner = slice.read_i16(0)?;
    let count = (slice.size() - 2) / 4;
    let mut sizes = Vec::with_capacity(count as usize);
    for k in 0..count {
        sizes.push(slice.read_i32(2 + 4 * k)?);
    }
    Ok(LocalArrays { owner, sizes })
}
