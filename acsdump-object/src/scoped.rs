//! Chunk-scoped bounds discipline
//!
//! Mirrors the file-level predicates but clamps to one chunk body.
//! Offsets that stay inside the file but leave the chunk are rejected
//! here. All positions are chunk-local; errors report absolute file
//! offsets.

use acsdump_spec::{Chunk, ObjectError, Result};

use crate::buffer::ObjectBuffer;

/// One chunk body, addressed by chunk-local offsets.
#[derive(Clone, Copy)]
pub struct ChunkSlice<'a> {
    buf: &'a ObjectBuffer,
    start: u32,
    size: u32,
}

impl<'a> ChunkSlice<'a> {
    /// Scope reads to a chunk the walker materialized. The walker has
    /// already verified the body lies within the file.
    pub fn new(buf: &'a ObjectBuffer, chunk: &Chunk) -> ChunkSlice<'a> {
        ChunkSlice {
            buf,
            start: chunk.data_offset,
            size: chunk.size,
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Absolute file offset of a chunk-local position.
    pub fn abs(&self, rel: u32) -> u32 {
        self.start + rel
    }

    /// Bytes remaining from a chunk-local position; negative past the
    /// end of the chunk.
    pub fn remaining_from(&self, rel: i64) -> i64 {
        self.size as i64 - rel
    }

    /// Fails with a short read unless `count` bytes of the chunk exist
    /// at `rel`.
    pub fn require(&self, rel: u32, count: u32) -> Result<()> {
        if self.remaining_from(rel as i64) >= count as i64 {
            Ok(())
        } else {
            Err(ObjectError::ShortRead {
                offset: self.start.saturating_add(rel),
                needed: count,
            })
        }
    }

    pub fn read_u8(&self, rel: u32) -> Result<u8> {
        self.require(rel, 1)?;
        self.buf.read_u8(self.abs(rel))
    }

    pub fn read_i16(&self, rel: u32) -> Result<i16> {
        self.require(rel, 2)?;
        self.buf.read_i16(self.abs(rel))
    }

    pub fn read_u16(&self, rel: u32) -> Result<u16> {
        self.require(rel, 2)?;
        self.buf.read_u16(self.abs(rel))
    }

    pub fn read_i32(&self, rel: u32) -> Result<i32> {
        self.require(rel, 4)?;
        self.buf.read_i32(self.abs(rel))
    }

    /// NUL-terminated byte string at a chunk-local offset, usually one
    /// read from an offset table inside the same chunk. The offset must
    /// land in the chunk and the terminator must occur before the chunk
    /// ends.
    pub fn cstr_at(&self, rel: i64) -> Result<&'a [u8]> {
        if rel < 0 || rel >= self.size as i64 {
            return Err(ObjectError::OffsetOutOfRange {
                offset: self.start as i64 + rel,
            });
        }
        let rel = rel as u32;
        let body = self.buf.read_slice(self.start, self.size)?;
        let rest = &body[rel as usize..];
        match rest.iter().position(|&byte| byte == 0) {
            Some(len) => Ok(&rest[..len]),
            None => Err(ObjectError::UnterminatedString {
                offset: self.abs(rel),
            }),
        }
    }

    /// A sequential cursor over the chunk body, starting at its front.
    pub fn reader(&self) -> ChunkReader<'a> {
        ChunkReader {
            slice: *self,
            pos: 0,
        }
    }
}

/// Sequential cursor over a chunk body.
pub struct ChunkReader<'a> {
    slice: ChunkSlice<'a>,
    pos: u32,
}

impl<'a> ChunkReader<'a> {
    pub fn pos(&self) -> u32 {
        self.pos
    }

    pub fn remaining(&self) -> i64 {
        self.slice.remaining_from(self.pos as i64)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let value = self.slice.read_u8(self.pos)?;
        self.pos += 1;
        Ok(value)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        let value = self.slice.read_i16(self.pos)?;
        self.pos += 2;
        Ok(value)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let value = self.slice.read_u16(self.pos)?;
        self.pos += 2;
        Ok(value)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let value = self.slice.read_i32(self.pos)?;
        self.pos += 4;
        Ok(value)
    }

    /// Read a NUL-terminated string and advance past its terminator.
    pub fn read_cstr(&mut self) -> Result<&'a [u8]> {
        let value = self.slice.cstr_at(self.pos as i64)?;
        self.pos += value.len() as u32 + 1;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acsdump_spec::ChunkTag;

    fn chunk_over(data: Vec<u8>, data_offset: u32, size: u32) -> (ObjectBuffer, Chunk) {
        let buf = ObjectBuffer::new(data).unwrap();
        let chunk = Chunk {
            name: *b"TEST",
            data_offset,
            size,
            tag: ChunkTag::Unknown,
        };
        (buf, chunk)
    }

    #[test]
    fn test_scoped_reads() {
        let (buf, chunk) = chunk_over(vec![0, 0, 0, 0, 1, 0, 0, 0, 9], 4, 5);
        let slice = ChunkSlice::new(&buf, &chunk);
        assert_eq!(slice.read_i32(0).unwrap(), 1);
        assert_eq!(slice.read_u8(4).unwrap(), 9);
        assert_eq!(slice.abs(4), 8);
    }

    #[test]
    fn test_out_of_chunk_rejected_inside_file() {
        // Buffer continues past the chunk; reads past the chunk end must
        // still fail.
        let (buf, chunk) = chunk_over(vec![7; 16], 4, 4);
        let slice = ChunkSlice::new(&buf, &chunk);
        assert!(slice.read_i32(0).is_ok());
        let err = slice.read_i32(4).unwrap_err();
        assert!(matches!(
            err,
            ObjectError::ShortRead {
                offset: 8,
                needed: 4
            }
        ));
    }

    #[test]
    fn test_cstr_within_chunk() {
        let (buf, chunk) = chunk_over(b"xxxxAB\0Zxxxx".to_vec(), 4, 4);
        let slice = ChunkSlice::new(&buf, &chunk);
        assert_eq!(slice.cstr_at(0).unwrap(), b"AB");
        // The "Z" run has no terminator inside the chunk even though the
        // buffer continues.
        assert!(matches!(
            slice.cstr_at(3).unwrap_err(),
            ObjectError::UnterminatedString { offset: 7 }
        ));
        assert!(matches!(
            slice.cstr_at(-1).unwrap_err(),
            ObjectError::OffsetOutOfRange { offset: 3 }
        ));
        assert!(slice.cstr_at(4).is_err());
    }

    #[test]
    fn test_reader_advances() {
        let (buf, chunk) = chunk_over(vec![1, 0, 2, 0, b'h', b'i', 0, 5], 0, 8);
        let slice = ChunkSlice::new(&buf, &chunk);
        let mut reader = slice.reader();
        assert_eq!(reader.read_i16().unwrap(), 1);
        assert_eq!(reader.read_u16().unwrap(), 2);
        assert_eq!(reader.read_cstr().unwrap(), b"hi");
        assert_eq!(reader.pos(), 7);
        assert_eq!(reader.remaining(), 1);
        assert_eq!(reader.read_u8().unwrap(), 5);
        assert_eq!(reader.remaining(), 0);
    }
}
