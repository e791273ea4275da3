//! Chunk headers and the generic chunk walker.
//!
//! Every LWO2 record is a 4-byte id followed by a length: 32-bit at the top
//! level, 16-bit inside other chunks. Payloads with an odd length are
//! followed by one pad byte. [`walk_chunks`] always leaves the cursor just
//! past the padded payload, whatever the handler consumed, which is what
//! lets unknown chunk kinds be ignored safely.

use std::fmt;

use crate::options::TruncationPolicy;

use super::cursor::ByteCursor;
use super::error::DecodeResult;

/// A 4-character chunk identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkId(pub [u8; 4]);

impl ChunkId {
    pub const FORM: ChunkId = ChunkId(*b"FORM");
    pub const LWO2: ChunkId = ChunkId(*b"LWO2");

    // Top-level chunks
    pub const PNTS: ChunkId = ChunkId(*b"PNTS");
    pub const POLS: ChunkId = ChunkId(*b"POLS");
    pub const TAGS: ChunkId = ChunkId(*b"TAGS");
    pub const PTAG: ChunkId = ChunkId(*b"PTAG");
    pub const CLIP: ChunkId = ChunkId(*b"CLIP");
    pub const SURF: ChunkId = ChunkId(*b"SURF");

    // Polygon and polygon-tag types
    pub const FACE: ChunkId = ChunkId(*b"FACE");
    pub const PTCH: ChunkId = ChunkId(*b"PTCH");

    // Surface sub-chunks
    pub const COLR: ChunkId = ChunkId(*b"COLR");
    pub const DIFF: ChunkId = ChunkId(*b"DIFF");
    pub const LUMI: ChunkId = ChunkId(*b"LUMI");
    pub const SPEC: ChunkId = ChunkId(*b"SPEC");
    pub const TRAN: ChunkId = ChunkId(*b"TRAN");
    pub const BLOK: ChunkId = ChunkId(*b"BLOK");
    pub const IMAG: ChunkId = ChunkId(*b"IMAG");

    // Clip sub-chunks
    pub const STIL: ChunkId = ChunkId(*b"STIL");
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02X}", b)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkId({})", self)
    }
}

/// Width of the length field that follows a chunk id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthWidth {
    /// Top-level chunks (`u32` length)
    U32,
    /// Sub-chunks nested in another chunk (`u16` length)
    U16,
}

/// A decoded chunk header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkHeader {
    pub id: ChunkId,
    pub length: u32,
}

impl ChunkHeader {
    /// Read an id and a length of the given width.
    pub fn read(cursor: &mut ByteCursor<'_>, width: LengthWidth) -> DecodeResult<Self> {
        let start = cursor.position();
        let id = cursor.read_id()?;
        let length = match width {
            LengthWidth::U32 => cursor.read_u32(),
            LengthWidth::U16 => cursor.read_u16().map(u32::from),
        };
        match length {
            Ok(length) => Ok(Self { id, length }),
            Err(e) => {
                cursor.seek_absolute(start);
                Err(e)
            }
        }
    }

    /// Payload length including the pad byte of odd-length chunks.
    pub fn padded_length(&self) -> usize {
        let length = self.length as usize;
        length + (length & 1)
    }
}

/// Walk consecutive chunks until the cursor is exhausted.
///
/// The handler receives each header and a cursor bounded to that chunk's
/// payload. After it returns, the outer cursor is positioned at the start
/// of the next chunk (clamped to the end of data).
///
/// A header that cannot be read in full is returned as an error. Errors
/// from the handler that only concern the current chunk are logged and
/// skipped under [`TruncationPolicy::SkipChunk`]; everything else
/// propagates.
pub fn walk_chunks<'a, F>(
    cursor: &mut ByteCursor<'a>,
    width: LengthWidth,
    policy: TruncationPolicy,
    mut handler: F,
) -> DecodeResult<()>
where
    F: FnMut(ChunkHeader, &mut ByteCursor<'a>) -> DecodeResult<()>,
{
    while !cursor.is_empty() {
        let header = ChunkHeader::read(cursor, width)?;
        let start = cursor.position();

        let mut payload = cursor.sub_cursor(header.length as usize);
        if payload.len() < header.length as usize {
            log::warn!(
                "Chunk {} at offset {} declares {} bytes but only {} remain",
                header.id,
                start,
                header.length,
                payload.len()
            );
        }

        if let Err(e) = handler(header, &mut payload) {
            match policy {
                TruncationPolicy::SkipChunk if e.is_chunk_local() => {
                    log::warn!("Skipping rest of chunk {} at offset {}: {}", header.id, start, e);
                }
                _ => return Err(e),
            }
        }

        cursor.seek_absolute(start + header.padded_length());
    }

    Ok(())
}
