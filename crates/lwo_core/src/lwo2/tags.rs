//! `TAGS` and `PTAG`: surface names and which polygons use them.

use std::collections::{BTreeMap, HashMap};

use super::chunk::ChunkId;
use super::cursor::ByteCursor;
use super::error::DecodeResult;

/// Surface names keyed by 1-based tag index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TagTable {
    names: BTreeMap<u16, String>,
}

impl TagTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` under the next tag index and return that index,
    /// or `None` once the 16-bit index space is used up.
    pub fn push(&mut self, name: String) -> Option<u16> {
        let index = match self.names.keys().next_back() {
            Some(&last) => last.checked_add(1)?,
            None => 1,
        };
        self.names.insert(index, name);
        Some(index)
    }

    pub fn name(&self, index: u16) -> Option<&str> {
        self.names.get(&index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, &str)> {
        self.names.iter().map(|(&i, n)| (i, n.as_str()))
    }
}

/// Decode a `TAGS` payload, appending its non-empty names to `table`.
pub fn read_tags(payload: &mut ByteCursor<'_>, table: &mut TagTable) -> DecodeResult<usize> {
    let mut count = 0;
    while !payload.is_empty() {
        let name = payload.read_string()?;
        if name.is_empty() {
            continue;
        }
        if table.push(name).is_none() {
            log::warn!("Tag table is full; ignoring remaining TAGS entries");
            break;
        }
        count += 1;
    }
    Ok(count)
}

/// Polygon indices grouped by tag index.
///
/// Each polygon belongs to at most one tag: assigning it again moves it.
#[derive(Clone, Debug, Default)]
pub struct TagAssignments {
    by_tag: BTreeMap<u16, Vec<usize>>,
    by_polygon: HashMap<usize, u16>,
}

impl TagAssignments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `polygon` to `tag`, replacing any earlier assignment.
    pub fn assign(&mut self, polygon: usize, tag: u16) {
        if let Some(previous) = self.by_polygon.insert(polygon, tag) {
            if previous == tag {
                return;
            }
            if let Some(list) = self.by_tag.get_mut(&previous) {
                list.retain(|&p| p != polygon);
                if list.is_empty() {
                    self.by_tag.remove(&previous);
                }
            }
        }
        self.by_tag.entry(tag).or_default().push(polygon);
    }

    /// Tag a polygon is assigned to.
    pub fn tag_of(&self, polygon: usize) -> Option<u16> {
        self.by_polygon.get(&polygon).copied()
    }

    /// Polygons assigned to `tag`, in assignment order.
    pub fn polygons(&self, tag: u16) -> &[usize] {
        self.by_tag.get(&tag).map_or(&[][..], Vec::as_slice)
    }

    /// Iterate tags in ascending order with their polygons.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &[usize])> {
        self.by_tag.iter().map(|(&t, p)| (t, p.as_slice()))
    }

    /// Number of distinct tags in use.
    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }
}

/// Decode a `PTAG` payload into `assignments`.
///
/// Only `SURF` tags are decoded. `polygon_base` is added to each polygon
/// index, which is relative to the preceding `POLS` chunk.
pub fn read_polygon_tags(
    payload: &mut ByteCursor<'_>,
    polygon_base: usize,
    assignments: &mut TagAssignments,
) -> DecodeResult<usize> {
    let kind = payload.read_id()?;
    if kind != ChunkId::SURF {
        log::debug!("Skipping PTAG of type {}", kind);
        return Ok(0);
    }

    let mut count = 0;
    while !payload.is_empty() {
        let polygon = (payload.read_vx()? as usize).saturating_add(polygon_base);
        let tag = payload.read_u16()?;
        assignments.assign(polygon, tag);
        count += 1;
    }
    Ok(count)
}
