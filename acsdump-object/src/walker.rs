//! Chunk-region walker
//!
//! The chunk region runs from the chunk offset to the end of the file,
//! or to the real header for indirect files. Each chunk is an 8-byte
//! header (four name bytes, 32-bit body size) followed by the body.

use acsdump_spec::{Chunk, ChunkTag, ObjectError, ObjectLayout, Result, CHUNK_HEADER_SIZE};

use crate::buffer::ObjectBuffer;

/// Walks the chunk region front to back. Restartable: build a new
/// walker to walk again.
pub struct ChunkWalker<'a> {
    buf: &'a ObjectBuffer,
    pos: u32,
    end: u32,
}

impl<'a> ChunkWalker<'a> {
    pub fn new(buf: &'a ObjectBuffer, layout: &ObjectLayout) -> ChunkWalker<'a> {
        debug_assert!(layout.format.is_chunked());
        let end = if layout.indirect {
            layout.real_header_offset
        } else {
            buf.len()
        };
        ChunkWalker {
            buf,
            pos: layout.chunk_offset,
            end,
        }
    }

    /// The next chunk, or `None` once fewer than a header's worth of
    /// bytes remain before the end of the region.
    ///
    /// A chunk's declared body may extend past the region end; that is
    /// accepted as long as it stays within the file, and the walk
    /// continues from behind the body either way.
    pub fn next_chunk(&mut self) -> Result<Option<Chunk>> {
        if self.pos as i64 + CHUNK_HEADER_SIZE as i64 > self.end as i64 {
            return Ok(None);
        }
        let name = self.buf.read_name(self.pos)?;
        let size = self.buf.read_i32(self.pos + 4)?;
        if size < 0 {
            return Err(ObjectError::NegativeCount { what: "chunk size" });
        }
        let size = size as u32;
        let data_offset = self.pos + CHUNK_HEADER_SIZE;
        self.buf.require_bytes(data_offset, size)?;
        self.pos = data_offset + size;
        Ok(Some(Chunk {
            name,
            data_offset,
            size,
            tag: ChunkTag::from_name(&name),
        }))
    }
}

/// First chunk carrying the requested tag, walking from the region
/// start.
pub fn find_chunk(
    buf: &ObjectBuffer,
    layout: &ObjectLayout,
    tag: ChunkTag,
) -> Result<Option<Chunk>> {
    let mut walker = ChunkWalker::new(buf, layout);
    while let Some(chunk) = walker.next_chunk()? {
        if chunk.tag == tag {
            return Ok(Some(chunk));
        }
    }
    Ok(None)
}
