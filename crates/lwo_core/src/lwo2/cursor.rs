//! Positional big-endian reader over an in-memory LWO2 buffer.

use byteorder::{BigEndian, ByteOrder};

use super::chunk::ChunkId;
use super::error::{DecodeError, DecodeResult};

/// Marker in the high byte of a 16-bit word announcing a 4-byte index.
const VX_LONG_MARKER: u16 = 0xFF00;

/// Reads big-endian scalars, padded strings and variable-width indices.
///
/// Reads are bounds-checked: a read that needs more bytes than remain
/// fails with [`DecodeError::Truncated`] and leaves the cursor untouched.
/// Seeks never fail; they clamp to `[0, len]`.
#[derive(Clone, Debug)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true when every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Take the next `needed` bytes, advancing past them.
    fn take(&mut self, needed: usize) -> DecodeResult<&'a [u8]> {
        if needed > self.remaining() {
            return Err(DecodeError::Truncated {
                offset: self.pos,
                needed,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + needed];
        self.pos += needed;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> DecodeResult<u16> {
        self.take(2).map(BigEndian::read_u16)
    }

    pub fn read_u32(&mut self) -> DecodeResult<u32> {
        self.take(4).map(BigEndian::read_u32)
    }

    pub fn read_f32(&mut self) -> DecodeResult<f32> {
        self.take(4).map(BigEndian::read_f32)
    }

    /// Read three consecutive floats.
    pub fn read_vec3(&mut self) -> DecodeResult<[f32; 3]> {
        Ok([self.read_f32()?, self.read_f32()?, self.read_f32()?])
    }

    /// Read a 4-byte chunk identifier.
    pub fn read_id(&mut self) -> DecodeResult<ChunkId> {
        let bytes = self.take(4)?;
        Ok(ChunkId([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a variable-width index (`VX`).
    ///
    /// Indices below `0xFF00` are stored in two bytes. Larger ones are
    /// stored in four, with the first byte set to `0xFF`; the remaining
    /// 24 bits hold the index.
    pub fn read_vx(&mut self) -> DecodeResult<u32> {
        let start = self.pos;
        let word = self.read_u16()?;
        if word & VX_LONG_MARKER != VX_LONG_MARKER {
            return Ok(u32::from(word));
        }

        match self.read_u16() {
            Ok(low) => Ok((u32::from(word & 0x00FF) << 16) | u32::from(low)),
            Err(e) => {
                self.pos = start;
                Err(e)
            }
        }
    }

    /// Read a NUL-terminated string padded to an even byte count.
    ///
    /// Invalid UTF-8 is replaced rather than rejected, since names are
    /// only used as lookup keys and labels.
    pub fn read_string(&mut self) -> DecodeResult<String> {
        let rest = &self.data[self.pos..];
        let Some(nul) = rest.iter().position(|&b| b == 0) else {
            return Err(DecodeError::Truncated {
                offset: self.pos,
                needed: rest.len() + 1,
                remaining: rest.len(),
            });
        };

        let text = String::from_utf8_lossy(&rest[..nul]).into_owned();
        let consumed = nul + 1;
        self.pos += consumed;
        if consumed % 2 == 1 {
            self.seek_relative(1);
        }
        Ok(text)
    }

    /// Move by `offset` bytes, clamped to the buffer.
    pub fn seek_relative(&mut self, offset: i64) {
        let target = self.pos as i64 + offset;
        self.pos = target.clamp(0, self.data.len() as i64) as usize;
    }

    /// Move to `pos`, clamped to the buffer.
    pub fn seek_absolute(&mut self, pos: usize) {
        self.pos = pos.min(self.data.len());
    }

    /// Split off a cursor over the next `len` bytes (fewer if the buffer
    /// ends first) and advance past them.
    pub fn sub_cursor(&mut self, len: usize) -> ByteCursor<'a> {
        let len = len.min(self.remaining());
        let sub = ByteCursor::new(&self.data[self.pos..self.pos + len]);
        self.pos += len;
        sub
    }
}
