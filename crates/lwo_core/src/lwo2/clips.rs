//! `CLIP`: image sources referenced by surface texture blocks.

use std::collections::BTreeMap;

use crate::options::TruncationPolicy;

use super::chunk::{walk_chunks, ChunkId, LengthWidth};
use super::cursor::ByteCursor;
use super::error::DecodeResult;

/// Still-image filenames keyed by 0-based clip index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClipTable {
    images: BTreeMap<u32, String>,
}

impl ClipTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: u32, filename: String) {
        self.images.insert(index, filename);
    }

    pub fn get(&self, index: u32) -> Option<&str> {
        self.images.get(&index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Decode a `CLIP` payload into `table`.
///
/// Clip indices are 1-based in the file and stored 0-based, matching the
/// way surfaces reference them. Returns the stored index if the clip had
/// a still image. Index 0 is invalid and the clip is ignored.
pub fn read_clip(
    payload: &mut ByteCursor<'_>,
    policy: TruncationPolicy,
    table: &mut ClipTable,
) -> DecodeResult<Option<u32>> {
    let index = match payload.read_u32()? {
        0 => {
            log::warn!("Ignoring CLIP with index 0");
            return Ok(None);
        }
        index => index - 1,
    };

    let mut filename = None;
    walk_chunks(payload, LengthWidth::U16, policy, |header, sub| {
        match header.id {
            ChunkId::STIL => filename = Some(sub.read_string()?),
            other => log::trace!("Skipping CLIP sub-chunk {}", other),
        }
        Ok(())
    })?;

    match filename {
        Some(filename) => {
            log::debug!("Clip {} -> {}", index, filename);
            table.insert(index, filename);
            Ok(Some(index))
        }
        None => {
            log::debug!("Clip {} has no still image", index);
            Ok(None)
        }
    }
}
