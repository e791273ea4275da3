//! `POLS`: polygon records and fan triangulation.

use std::collections::BTreeMap;

use crate::options::DecodeOptions;

use super::chunk::ChunkId;
use super::cursor::ByteCursor;
use super::error::{DecodeError, DecodeResult};

/// Low 10 bits of the record word hold the vertex count.
const VERTEX_COUNT_MASK: u16 = 0x03FF;

/// One polygon as declared in the file, with its triangles.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonRecord {
    /// 0-based polygon index across the whole object
    pub index: usize,

    /// Vertex indices into the object's vertex array
    pub vertices: Vec<u32>,

    /// High 6 bits of the record word
    pub flags: u16,

    /// Fan triangulation of `vertices`
    pub triangles: Vec<[u32; 3]>,
}

/// Polygon records keyed by polygon index.
#[derive(Clone, Debug, Default)]
pub struct PolygonTable {
    records: BTreeMap<usize, PolygonRecord>,
    next_index: usize,
}

impl PolygonTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the next polygon will receive.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Store a polygon under the next index.
    pub fn push(&mut self, vertices: Vec<u32>, flags: u16) -> usize {
        let index = self.next_index;
        let triangles = fan_triangulate(&vertices);
        self.records.insert(
            index,
            PolygonRecord {
                index,
                vertices,
                flags,
                triangles,
            },
        );
        self.next_index += 1;
        index
    }

    pub fn get(&self, index: usize) -> Option<&PolygonRecord> {
        self.records.get(&index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PolygonRecord> {
        self.records.values()
    }

    /// Sum of triangle counts over all polygons.
    pub fn triangle_count(&self) -> usize {
        self.records.values().map(|r| r.triangles.len()).sum()
    }
}

/// Fan-triangulate a polygon: triangle `i` is `(v0, v[i+1], v[i+2])`.
///
/// Polygons with fewer than three vertices produce no triangles.
pub fn fan_triangulate(vertices: &[u32]) -> Vec<[u32; 3]> {
    if vertices.len() < 3 {
        return Vec::new();
    }

    let v0 = vertices[0];
    vertices[1..]
        .windows(2)
        .map(|pair| [v0, pair[0], pair[1]])
        .collect()
}

/// Whether `POLS` chunks of type `kind` are decoded.
pub fn is_decoded_type(kind: ChunkId, options: &DecodeOptions) -> bool {
    kind == ChunkId::FACE || (kind == ChunkId::PTCH && options.accept_patches)
}

/// Decode a `POLS` payload into `table`.
///
/// `vertex_base` is added to every vertex index, since indices are
/// relative to the points of the current layer. Returns the number of
/// polygons read, or `None` if the polygon type is not decoded.
pub fn read_polygons(
    payload: &mut ByteCursor<'_>,
    vertex_base: u32,
    options: &DecodeOptions,
    table: &mut PolygonTable,
) -> DecodeResult<Option<usize>> {
    let kind = payload.read_id()?;
    if !is_decoded_type(kind, options) {
        log::debug!("Skipping POLS of type {}", kind);
        return Ok(None);
    }

    let mut count = 0;
    while !payload.is_empty() {
        let word = payload.read_u16()?;
        let vertex_count = usize::from(word & VERTEX_COUNT_MASK);
        let flags = word >> 10;

        if vertex_count > options.max_polygon_vertices {
            return Err(DecodeError::PolygonTooLarge {
                count: vertex_count,
                limit: options.max_polygon_vertices,
            });
        }

        let mut vertices = Vec::with_capacity(vertex_count);
        for _ in 0..vertex_count {
            vertices.push(payload.read_vx()?.saturating_add(vertex_base));
        }

        if vertex_count < 3 {
            log::trace!(
                "Polygon {} has {} vertices, no triangles",
                table.next_index(),
                vertex_count
            );
        }
        table.push(vertices, flags);
        count += 1;
    }

    Ok(Some(count))
}
