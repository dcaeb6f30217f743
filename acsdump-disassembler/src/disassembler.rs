//! Segment driver

use acsdump_spec::Result;
use log::debug;

use crate::decoder::{decode_instruction, Decoded};
use crate::formatter::format_instruction;
use crate::segment::PcodeSegment;

/// Disassemble the code at `[offset, offset + size)` of the file bytes
/// into dump lines.
///
/// An unknown opcode prints an `unknown pcode` line at its pc and ends
/// the segment; a field read crossing the segment bound is an error.
pub fn disassemble(data: &[u8], offset: u32, size: u32, small_code: bool) -> Result<String> {
    let mut segment = PcodeSegment::new(data, offset, size)?;
    let mut out = String::new();
    while !segment.at_end() {
        match decode_instruction(&mut segment, small_code)? {
            Decoded::Instruction(instruction) => {
                out.push_str(&format_instruction(&instruction));
            }
            Decoded::UnknownOpcode { pc, id } => {
                debug!("unknown pcode {id} at offset {pc}, ending segment");
                out.push_str(&format!("{pc:08}> unknown pcode: {id}\n"));
                break;
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_i32(data: &mut Vec<u8>, value: i32) {
        data.extend_from_slice(&value.to_le_bytes());
    }

    #[test]
    fn test_wide_sequence() {
        let mut data = Vec::new();
        push_i32(&mut data, 3); // pushnumber
        push_i32(&mut data, 42);
        push_i32(&mut data, 54); // drop
        push_i32(&mut data, 1); // terminate
        let out = disassemble(&data, 0, data.len() as u32, false).unwrap();
        assert_eq!(
            out,
            "00000000> pushnumber 42\n\
             00000008> drop\n\
             00000012> terminate\n"
        );
    }

    #[test]
    fn test_compact_sequence() {
        // pushbyte 7, then terminate.
        let data = [167u8, 7, 1];
        let out = disassemble(&data, 0, 3, true).unwrap();
        assert_eq!(
            out,
            "00000000> pushbyte 7\n\
             00000002> terminate\n"
        );
    }

    #[test]
    fn test_unknown_opcode_ends_segment() {
        let mut data = Vec::new();
        push_i32(&mut data, 1); // terminate
        push_i32(&mut data, 5000);
        push_i32(&mut data, 1); // never reached
        let out = disassemble(&data, 0, data.len() as u32, false).unwrap();
        assert_eq!(
            out,
            "00000000> terminate\n\
             00000004> unknown pcode: 5000\n"
        );
    }

    #[test]
    fn test_empty_segment() {
        let out = disassemble(&[1, 2, 3], 1, 0, false).unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn test_nonzero_base_offsets() {
        let mut data = vec![0xEE; 8]; // unrelated bytes before the code
        push_i32(&mut data, 54); // drop at offset 8
        let out = disassemble(&data, 8, 4, false).unwrap();
        assert_eq!(out, "00000008> drop\n");
    }

    #[test]
    fn test_truncated_stream_is_error() {
        let data = [3u8, 0, 0]; // not even a full wide opcode
        assert!(disassemble(&data, 0, 3, false).unwrap_err().is_ill_formed());
    }
}
