//! # ACS Object-File Data Model
//!
//! Shared data model for the acsdump toolchain: container formats, chunk
//! tags, the pcode metadata table, and the common error taxonomy.
//!
//! An ACS object file comes in three container variants:
//! - ACS0: flat header plus script and string directories;
//! - ACSE: chunked container, wide (32-bit) bytecode;
//! - ACSe: chunked container, compact bytecode.
//!
//! ACSE/ACSe additionally come in an *indirect* flavor that disguises
//! itself as ACS0 and hides the real header inside the file.

pub mod chunk;
pub mod error;
pub mod layout;
pub mod pcode;
pub mod script;

pub use chunk::{Chunk, ChunkTag};
pub use error::{ObjectError, Result};
pub use layout::{Format, ObjectLayout};
pub use pcode::{pcode_info, ArgKind, PcodeInfo, PCODES, PCODE_TOTAL};
pub use script::script_type_name;

/// Magic bytes of an ACS0 header (also the disguise of indirect files).
pub const MAGIC_ACS0: [u8; 4] = *b"ACS\0";

/// Magic bytes of the wide chunked container.
pub const MAGIC_ACSE: [u8; 4] = *b"ACSE";

/// Magic bytes of the compact chunked container.
pub const MAGIC_ACSLE: [u8; 4] = *b"ACSe";

/// Primary header size: four magic bytes plus a 32-bit offset.
pub const HEADER_SIZE: u32 = 8;

/// Chunk header size: four name bytes plus a 32-bit body size.
pub const CHUNK_HEADER_SIZE: u32 = 8;

/// Size of one ACS0 script-directory entry (number, offset, num_param).
pub const ACS0_ENTRY_SIZE: u32 = 12;

/// Compact-encoding opcode bytes at or above this value take a second byte.
pub const LONG_PCODE_THRESHOLD: u8 = 240;

/// Largest object file the inspector will address.
pub const MAX_OBJECT_SIZE: u64 = i32::MAX as u64;
