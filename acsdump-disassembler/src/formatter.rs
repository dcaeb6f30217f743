//! Instruction formatting
//!
//! One line per instruction: the pc as an eight-digit decimal, the
//! mnemonic, then space-separated operands. Sorted jump tables add one
//! sub-line per case at the case's own pc.

use acsdump_spec::pcode_info;

use crate::decoder::{Instruction, Operands};

/// Render one decoded instruction, newline-terminated.
pub fn format_instruction(instruction: &Instruction) -> String {
    let mnemonic = pcode_info(instruction.id)
        .map(|info| info.mnemonic)
        .unwrap_or("?");
    let mut out = format!("{:08}> {}", instruction.pc, mnemonic);
    match &instruction.operands {
        Operands::None => out.push('\n'),
        Operands::Ints(values) => {
            for value in values {
                out.push_str(&format!(" {value}"));
            }
            out.push('\n');
        }
        Operands::CountedBytes(bytes) => {
            out.push_str(&format!(" count={}", bytes.len()));
            for byte in bytes {
                out.push_str(&format!(" {byte}"));
            }
            out.push('\n');
        }
        Operands::CaseTable { count, cases } => {
            out.push_str(&format!(" num-cases={count}\n"));
            for case in cases {
                out.push_str(&format!(
                    "{:08}>   case {}: {}\n",
                    case.pc, case.value, case.target
                ));
            }
        }
    }
    out
}
