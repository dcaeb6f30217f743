//! PCode segment cursor
//!
//! A segment scopes one script or function body. Positions are absolute
//! file offsets; every field read is bounds-checked against the segment
//! end first.

use acsdump_spec::{ObjectError, Result, LONG_PCODE_THRESHOLD};

/// Cursor over `[offset, offset + size)` of the file bytes.
pub struct PcodeSegment<'a> {
    data: &'a [u8],
    pos: u32,
    end: u32,
}

impl<'a> PcodeSegment<'a> {
    /// Scope a segment. The bound must not extend past the file; code
    /// sizes produced by extent inference satisfy this by construction.
    pub fn new(data: &'a [u8], offset: u32, size: u32) -> Result<PcodeSegment<'a>> {
        let end = offset as i64 + size as i64;
        if end > data.len() as i64 {
            return Err(ObjectError::ShortRead {
                offset,
                needed: size,
            });
        }
        Ok(PcodeSegment {
            data,
            pos: offset,
            end: end as u32,
        })
    }

    /// Current position as an absolute file offset.
    pub fn pos(&self) -> u32 {
        self.pos
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.end
    }

    fn require(&self, count: u32) -> Result<()> {
        if self.pos as i64 + count as i64 <= self.end as i64 {
            Ok(())
        } else {
            Err(ObjectError::ShortRead {
                offset: self.pos,
                needed: count,
            })
        }
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.require(1)?;
        let value = self.data[self.pos as usize];
        self.pos += 1;
        Ok(value)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.require(2)?;
        let pos = self.pos as usize;
        self.pos += 2;
        Ok(i16::from_le_bytes([self.data[pos], self.data[pos + 1]]))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.require(4)?;
        let pos = self.pos as usize;
        self.pos += 4;
        Ok(i32::from_le_bytes([
            self.data[pos],
            self.data[pos + 1],
            self.data[pos + 2],
            self.data[pos + 3],
        ]))
    }

    /// Read an opcode id: a 32-bit integer in the wide encoding; in the
    /// compact encoding one byte, plus a second byte added on when the
    /// first is at least 240.
    pub fn read_opcode(&mut self, small_code: bool) -> Result<i32> {
        if small_code {
            let first = self.read_u8()?;
            let mut id = first as i32;
            if first >= LONG_PCODE_THRESHOLD {
                id += self.read_u8()? as i32;
            }
            Ok(id)
        } else {
            self.read_i32()
        }
    }

    /// Advance to the next 4-byte-aligned *file* offset, consuming the
    /// padding bytes. A cursor already on the boundary consumes nothing.
    pub fn align4(&mut self) -> Result<()> {
        let rem = self.pos % 4;
        if rem != 0 {
            self.require(4 - rem)?;
            self.pos += 4 - rem;
        }
        Ok(())
    }
}
