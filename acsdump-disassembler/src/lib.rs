//! # PCode Disassembler
//!
//! Decodes script and function bodies into textual instruction dumps.
//! The stream comes in two encodings: wide (32-bit little-endian opcodes
//! and immediates) and compact ("small code": one- or two-byte opcodes,
//! byte-wide immediates for most instructions).
//!
//! The stream carries no end marker; callers bound a segment with the
//! code size inferred from the surrounding file geometry. Unknown
//! opcodes end a segment; out-of-segment field reads are errors.

pub mod decoder;
pub mod disassembler;
pub mod formatter;
pub mod segment;

pub use decoder::{decode_instruction, Case, Decoded, Instruction, Operands};
pub use disassembler::disassemble;
pub use formatter::format_instruction;
pub use segment::PcodeSegment;
