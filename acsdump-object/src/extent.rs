//! Code-extent inference
//!
//! Script and function bodies carry no length field and the bytecode has
//! no end marker. The only safe upper bound on a body's length is the
//! distance to the nearest *later* offset anything else in the file lays
//! claim to: another script or function, a directory entry or string, or
//! the start of a top-level region.

use acsdump_spec::{ChunkTag, ObjectLayout, Result};

use crate::buffer::ObjectBuffer;
use crate::chunks::{read_func, read_sptr};
use crate::directory::{read_script_directory, read_string_directory};
use crate::scoped::ChunkSlice;
use crate::walker::find_chunk;

/// Conservative upper bound on the size of the code starting at
/// `offset`: the real code may end earlier, never later (for a
/// well-formed file). `offset` must lie inside the file.
pub fn calc_code_size(buf: &ObjectBuffer, layout: &ObjectLayout, offset: u32) -> Result<u32> {
    let offset = buf.require_offset(offset as i64)? as i64;
    let mut end = buf.len() as i64;
    let mut consider = |candidate: i64| {
        if candidate > offset && candidate < end {
            end = candidate;
        }
    };

    if layout.format.is_chunked() {
        // The starting offset of an adjacent script or function bounds
        // this one.
        if let Some(chunk) = find_chunk(buf, layout, ChunkTag::Sptr)? {
            let slice = ChunkSlice::new(buf, &chunk);
            for entry in read_sptr(&slice, layout.indirect)? {
                consider(entry.offset as i64);
            }
        }
        if let Some(chunk) = find_chunk(buf, layout, ChunkTag::Func)? {
            let slice = ChunkSlice::new(buf, &chunk);
            for entry in read_func(&slice)? {
                consider(entry.offset as i64);
            }
        }
        // For the last script, the chunk region bounds it.
        consider(layout.chunk_offset as i64);
    }

    if layout.has_directory() {
        for entry in read_script_directory(buf, layout)? {
            consider(entry.offset as i64);
        }
        for string_offset in read_string_directory(buf, layout)? {
            consider(string_offset as i64);
        }
        consider(layout.directory_offset as i64);
    }

    Ok((end - offset) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::resolve_layout;

    fn push_i32(data: &mut Vec<u8>, value: i32) {
        data.extend_from_slice(&value.to_le_bytes());
    }

    fn push_i16(data: &mut Vec<u8>, value: i16) {
        data.extend_from_slice(&value.to_le_bytes());
    }

    // Direct ACSE file: 8-byte header, code filler, then an SPTR chunk
    // declaring scripts at file offsets 12 and 80.
    fn acse_two_scripts() -> Vec<u8> {
        let mut data = b"ACSE".to_vec();
        push_i32(&mut data, 120); // chunk region
        data.resize(120, 0);
        data.extend_from_slice(b"SPTR");
        push_i32(&mut data, 24);
        for (number, offset) in [(1i16, 12i32), (2, 80)] {
            push_i16(&mut data, number);
            push_i16(&mut data, 0); // type
            push_i32(&mut data, offset);
            push_i32(&mut data, 0); // params
        }
        data
    }

    #[test]
    fn test_bounded_by_next_script() {
        let buf = ObjectBuffer::new(acse_two_scripts()).unwrap();
        let layout = resolve_layout(&buf).unwrap();
        assert_eq!(calc_code_size(&buf, &layout, 12).unwrap(), 80 - 12);
    }

    #[test]
    fn test_last_script_bounded_by_chunk_region() {
        let buf = ObjectBuffer::new(acse_two_scripts()).unwrap();
        let layout = resolve_layout(&buf).unwrap();
        assert_eq!(calc_code_size(&buf, &layout, 80).unwrap(), 120 - 80);
    }

    #[test]
    fn test_bounded_by_function_offset() {
        let mut data = acse_two_scripts();
        data.extend_from_slice(b"FUNC");
        push_i32(&mut data, 8);
        data.extend_from_slice(&[0, 0, 0, 0]);
        push_i32(&mut data, 40); // function body at 40
        let buf = ObjectBuffer::new(data).unwrap();
        let layout = resolve_layout(&buf).unwrap();
        assert_eq!(calc_code_size(&buf, &layout, 12).unwrap(), 40 - 12);
    }

    #[test]
    fn test_acs0_bounded_by_directory() {
        let mut data = b"ACS\0".to_vec();
        push_i32(&mut data, 20);
        data.resize(20, 0); // code filler
        push_i32(&mut data, 1); // total scripts
        push_i32(&mut data, 1);
        push_i32(&mut data, 8); // script at 8
        push_i32(&mut data, 0);
        push_i32(&mut data, 0); // total strings
        let buf = ObjectBuffer::new(data).unwrap();
        let layout = resolve_layout(&buf).unwrap();
        // The directory itself is the nearest later offset.
        assert_eq!(calc_code_size(&buf, &layout, 8).unwrap(), 20 - 8);
    }

    #[test]
    fn test_acs0_bounded_by_string_offset() {
        let mut data = b"ACS\0".to_vec();
        push_i32(&mut data, 24);
        data.resize(24, 0);
        push_i32(&mut data, 1); // total scripts
        push_i32(&mut data, 1);
        push_i32(&mut data, 8); // script at 8
        push_i32(&mut data, 0);
        push_i32(&mut data, 1); // total strings
        push_i32(&mut data, 14); // string at 14, inside the code filler
        data.extend_from_slice(b"s\0");
        let buf = ObjectBuffer::new(data).unwrap();
        let layout = resolve_layout(&buf).unwrap();
        assert_eq!(calc_code_size(&buf, &layout, 8).unwrap(), 14 - 8);
    }

    #[test]
    fn test_offset_outside_file() {
        let buf = ObjectBuffer::new(acse_two_scripts()).unwrap();
        let layout = resolve_layout(&buf).unwrap();
        let len = buf.len();
        assert!(calc_code_size(&buf, &layout, len).unwrap_err().is_ill_formed());
    }
}
