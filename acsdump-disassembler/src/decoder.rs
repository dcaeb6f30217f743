//! Instruction decoder
//!
//! One decode step per instruction, dispatched over the operand class
//! from the static opcode table. The `small_code` flag changes integer
//! widths class by class; see [`acsdump_spec::ArgKind`].

use acsdump_spec::{pcode_info, ArgKind, Result};

use crate::segment::PcodeSegment;

/// One decoded instruction.
#[derive(Clone, Debug)]
pub struct Instruction {
    /// Absolute file offset of the opcode.
    pub pc: u32,
    pub id: i32,
    pub operands: Operands,
}

/// Decoded operand list, polymorphic per opcode class.
#[derive(Clone, Debug)]
pub enum Operands {
    None,
    Ints(Vec<i32>),
    /// `pushbytes`: explicit count, then the bytes.
    CountedBytes(Vec<u8>),
    /// `casegotosorted`: the declared case count and the decoded cases.
    CaseTable { count: i32, cases: Vec<Case> },
}

/// One sorted-jump-table case, pinned to its own file offset.
#[derive(Clone, Copy, Debug)]
pub struct Case {
    pub pc: u32,
    pub value: i32,
    pub target: i32,
}

/// Outcome of one decode step.
#[derive(Clone, Debug)]
pub enum Decoded {
    Instruction(Instruction),
    /// The id at `pc` is outside the instruction set. Disassembly of the
    /// segment ends here; there is no resynchronization.
    UnknownOpcode { pc: u32, id: i32 },
}

/// Decode the instruction at the cursor, advancing it by exactly the
/// bytes consumed.
pub fn decode_instruction(segment: &mut PcodeSegment, small_code: bool) -> Result<Decoded> {
    let pc = segment.pos();
    let id = segment.read_opcode(small_code)?;
    let info = match pcode_info(id) {
        Some(info) => info,
        None => return Ok(Decoded::UnknownOpcode { pc, id }),
    };

    let operands = match info.args {
        ArgKind::None => Operands::None,

        ArgKind::Scaled => {
            let value = read_scaled(segment, small_code)?;
            Operands::Ints(vec![value])
        }

        ArgKind::Words(count) => {
            let mut values = Vec::with_capacity(count as usize);
            for _ in 0..count {
                values.push(segment.read_i32()?);
            }
            Operands::Ints(values)
        }

        // The id shrinks with the encoding; the arguments never do.
        ArgKind::SpecDirect(count) => {
            let mut values = Vec::with_capacity(count as usize + 1);
            values.push(read_scaled(segment, small_code)?);
            for _ in 0..count {
                values.push(segment.read_i32()?);
            }
            Operands::Ints(values)
        }

        ArgKind::SpecDirectBytes(count) => {
            let mut values = Vec::with_capacity(count as usize + 1);
            for _ in 0..=count {
                values.push(segment.read_u8()? as i32);
            }
            Operands::Ints(values)
        }

        ArgKind::Bytes(count) => {
            let mut values = Vec::with_capacity(count as usize);
            for _ in 0..count {
                values.push(segment.read_u8()? as i32);
            }
            Operands::Ints(values)
        }

        ArgKind::CountedBytes => {
            let count = segment.read_u8()?;
            let mut bytes = Vec::with_capacity(count as usize);
            for _ in 0..count {
                bytes.push(segment.read_u8()?);
            }
            Operands::CountedBytes(bytes)
        }

        ArgKind::SortedCaseTable => {
            segment.align4()?;
            let count = segment.read_i32()?;
            let mut cases = Vec::new();
            for _ in 0..count.max(0) {
                let case_pc = segment.pos();
                let value = segment.read_i32()?;
                let target = segment.read_i32()?;
                cases.push(Case {
                    pc: case_pc,
                    value,
                    target,
                });
            }
            Operands::CaseTable { count, cases }
        }

        ArgKind::FuncCall => {
            let num_args = read_scaled(segment, small_code)?;
            let index = if small_code {
                segment.read_i16()? as i32
            } else {
                segment.read_i32()?
            };
            Operands::Ints(vec![num_args, index])
        }
    };

    Ok(Decoded::Instruction(Instruction { pc, id, operands }))
}

// One integer, byte-sized under the compact encoding.
fn read_scaled(segment: &mut PcodeSegment, small_code: bool) -> Result<i32> {
    if small_code {
        Ok(segment.read_u8()? as i32)
    } else {
        segment.read_i32()
    }
}
