//! # ACS Object Access
//!
//! Bounds-checked access to an ACS object file held in memory:
//!
//! - [`buffer`]: the file bytes and the file-level bounds discipline;
//! - [`scoped`]: the chunk-scoped mirror of that discipline;
//! - [`format`]: format discrimination and layout resolution;
//! - [`walker`]: iteration over the chunk region;
//! - [`chunks`]: typed decoders for the recognized chunk layouts;
//! - [`directory`]: the ACS0 script and string directories;
//! - [`extent`]: code-size inference for script and function bodies.
//!
//! Every offset read from the file is untrusted input; each layer checks
//! bounds before dereferencing anything.

pub mod buffer;
pub mod chunks;
pub mod directory;
pub mod extent;
pub mod format;
pub mod scoped;
pub mod walker;

pub use buffer::ObjectBuffer;
pub use extent::calc_code_size;
pub use format::resolve_layout;
pub use scoped::{ChunkReader, ChunkSlice};
pub use walker::{find_chunk, ChunkWalker};
