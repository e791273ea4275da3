//! Top-level `FORM` parsing: signature checks and chunk dispatch.

use crate::mesh::Vertex;
use crate::options::DecodeOptions;

use super::chunk::{walk_chunks, ChunkId, LengthWidth};
use super::clips::{read_clip, ClipTable};
use super::cursor::ByteCursor;
use super::error::{DecodeError, DecodeResult};
use super::points::read_points;
use super::polygons::{is_decoded_type, read_polygons, PolygonTable};
use super::surfaces::{read_surface, SurfaceTable};
use super::tags::{read_polygon_tags, read_tags, TagAssignments, TagTable};

/// Every table decoded from one LWO2 stream, before assembly.
#[derive(Clone, Debug, Default)]
pub struct DecodedTables {
    pub vertices: Vec<Vertex>,
    pub polygons: PolygonTable,
    pub tags: TagTable,
    pub assignments: TagAssignments,
    pub clips: ClipTable,
    pub surfaces: SurfaceTable,
}

/// Running offsets that make layer-relative indices object-global.
#[derive(Clone, Copy, Debug)]
struct LayerBase {
    /// First vertex of the most recent `PNTS`
    vertex: u32,
    /// First polygon of the most recent `POLS`, or `None` if that chunk
    /// held a polygon type that is not decoded
    polygon: Option<usize>,
}

fn expect_id(cursor: &mut ByteCursor<'_>, expected: ChunkId) -> DecodeResult<()> {
    let found = cursor.read_id()?;
    if found != expected {
        return Err(DecodeError::InvalidSignature { expected, found });
    }
    Ok(())
}

/// Decode every supported chunk of an LWO2 stream into tables.
///
/// Fails if the stream does not start with `FORM` .. `LWO2`, or if a chunk
/// header is cut off. Other problems are confined to the chunk they occur
/// in, according to `options.truncation`.
pub fn decode_tables(data: &[u8], options: &DecodeOptions) -> DecodeResult<DecodedTables> {
    let mut cursor = ByteCursor::new(data);

    expect_id(&mut cursor, ChunkId::FORM)?;
    let form_length = cursor.read_u32()? as usize;
    if form_length > cursor.remaining() {
        log::warn!(
            "FORM declares {} bytes but only {} remain",
            form_length,
            cursor.remaining()
        );
    }
    let mut body = cursor.sub_cursor(form_length);
    expect_id(&mut body, ChunkId::LWO2)?;

    let mut tables = DecodedTables::default();
    let mut base = LayerBase {
        vertex: 0,
        polygon: Some(0),
    };

    walk_chunks(&mut body, LengthWidth::U32, options.truncation, |header, payload| {
        match header.id {
            ChunkId::PNTS => {
                base.vertex = u32::try_from(tables.vertices.len()).unwrap_or(u32::MAX);
                let count = read_points(payload, &mut tables.vertices)?;
                log::debug!("PNTS: {} points", count);
            }
            ChunkId::POLS => {
                // Set before decoding: records kept from a chunk that fails
                // partway still take their tags from the next PTAG.
                base.polygon = None;
                let kind = payload.clone().read_id()?;
                if is_decoded_type(kind, options) {
                    base.polygon = Some(tables.polygons.next_index());
                }
                if let Some(count) = read_polygons(payload, base.vertex, options, &mut tables.polygons)? {
                    log::debug!("POLS: {} polygons", count);
                }
            }
            ChunkId::TAGS => {
                let count = read_tags(payload, &mut tables.tags)?;
                log::debug!("TAGS: {} names", count);
            }
            ChunkId::PTAG => match base.polygon {
                Some(polygon_base) => {
                    let count = read_polygon_tags(payload, polygon_base, &mut tables.assignments)?;
                    log::debug!("PTAG: {} assignments", count);
                }
                None => log::debug!("Skipping PTAG for undecoded polygons"),
            },
            ChunkId::CLIP => {
                read_clip(payload, options.truncation, &mut tables.clips)?;
            }
            ChunkId::SURF => {
                read_surface(payload, options.truncation, &mut tables.surfaces)?;
            }
            other => log::trace!("Skipping chunk {} ({} bytes)", other, header.length),
        }
        Ok(())
    })?;

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lwo2::test_util::*;
    use crate::options::TruncationPolicy;

    #[test]
    fn test_wrong_container_signature() {
        let mut data = form(&[]);
        data[..4].copy_from_slice(b"RIFF");

        match decode_tables(&data, &DecodeOptions::default()) {
            Err(DecodeError::InvalidSignature { expected, found }) => {
                assert_eq!(expected, ChunkId::FORM);
                assert_eq!(found, ChunkId(*b"RIFF"));
            }
            other => panic!("Expected InvalidSignature, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_format_signature() {
        let mut data = form(&[]);
        data[8..12].copy_from_slice(b"LWOB");

        match decode_tables(&data, &DecodeOptions::default()) {
            Err(DecodeError::InvalidSignature { expected, found }) => {
                assert_eq!(expected, ChunkId::LWO2);
                assert_eq!(found, ChunkId(*b"LWOB"));
            }
            other => panic!("Expected InvalidSignature, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_is_truncated() {
        assert!(matches!(
            decode_tables(&[], &DecodeOptions::default()),
            Err(DecodeError::Truncated { .. })
        ));
    }

    #[test]
    fn test_empty_form() {
        let tables = decode_tables(&form(&[]), &DecodeOptions::default()).unwrap();
        assert!(tables.vertices.is_empty());
        assert!(tables.polygons.is_empty());
    }

    #[test]
    fn test_two_point_quad() {
        // 24-byte PNTS and a single quad
        let data = form(&[
            pnts(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]),
            pols(*b"FACE", &[&[0, 1, 2, 3]]),
        ]);
        let tables = decode_tables(&data, &DecodeOptions::default()).unwrap();

        assert_eq!(tables.vertices.len(), 2);
        assert_eq!(tables.polygons.get(0).unwrap().triangles, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_all_tables() {
        let data = form(&[
            tags(&["Red", "Blue"]),
            unit_quad_points(),
            pols(*b"FACE", &[&[0, 1, 2, 3]]),
            ptag(*b"SURF", &[(0, 1)]),
            clip(1, "red.png"),
            surf("Red", &[colr([1.0, 0.0, 0.0]), image_block(1)]),
        ]);
        let tables = decode_tables(&data, &DecodeOptions::default()).unwrap();

        assert_eq!(tables.tags.name(1), Some("Red"));
        assert_eq!(tables.tags.name(2), Some("Blue"));
        assert_eq!(tables.assignments.polygons(1), &[0]);
        assert_eq!(tables.clips.get(0), Some("red.png"));
        assert_eq!(tables.surfaces.get("Red").unwrap().clip_indices, vec![0]);
    }

    #[test]
    fn test_unknown_chunks_are_skipped() {
        let data = form(&[
            chunk(*b"LAYR", &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
            chunk(*b"VMAP", &[1, 2, 3, 4, 5]),
            unit_quad_points(),
            chunk(*b"BBOX", &[0; 24]),
            pols(*b"FACE", &[&[0, 1, 2]]),
        ]);
        let tables = decode_tables(&data, &DecodeOptions::default()).unwrap();

        assert_eq!(tables.vertices.len(), 4);
        assert_eq!(tables.polygons.len(), 1);
    }

    #[test]
    fn test_layers_offset_indices() {
        let data = form(&[
            pnts(&[[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
            pols(*b"FACE", &[&[0, 1, 2]]),
            ptag(*b"SURF", &[(0, 1)]),
            pnts(&[[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]]),
            pols(*b"FACE", &[&[2, 1, 0]]),
            ptag(*b"SURF", &[(0, 2)]),
        ]);
        let tables = decode_tables(&data, &DecodeOptions::default()).unwrap();

        assert_eq!(tables.vertices.len(), 6);
        assert_eq!(tables.polygons.get(1).unwrap().vertices, vec![5, 4, 3]);
        assert_eq!(tables.assignments.polygons(1), &[0]);
        assert_eq!(tables.assignments.polygons(2), &[1]);
    }

    #[test]
    fn test_ptag_after_skipped_pols_is_ignored() {
        let data = form(&[
            tags(&["Curve", "Face"]),
            unit_quad_points(),
            pols(*b"CURV", &[&[0, 1, 2, 3]]),
            ptag(*b"SURF", &[(0, 1)]),
            pols(*b"FACE", &[&[0, 1, 2]]),
            ptag(*b"SURF", &[(0, 2)]),
        ]);
        let tables = decode_tables(&data, &DecodeOptions::default()).unwrap();

        assert_eq!(tables.polygons.len(), 1);
        assert!(tables.assignments.polygons(1).is_empty());
        assert_eq!(tables.assignments.polygons(2), &[0]);
    }

    #[test]
    fn test_truncated_chunk_policies() {
        // A polygon record cut short, followed by a valid TAGS chunk
        let mut bad_pols = b"FACE".to_vec();
        bad_pols.extend(u16s(&[3, 0, 1]));
        let data = form(&[unit_quad_points(), chunk(*b"POLS", &bad_pols), tags(&["After"])]);

        let tables = decode_tables(&data, &DecodeOptions::default()).unwrap();
        assert!(tables.polygons.is_empty());
        assert_eq!(tables.tags.name(1), Some("After"));

        let abort = DecodeOptions {
            truncation: TruncationPolicy::Abort,
            ..Default::default()
        };
        assert!(matches!(
            decode_tables(&data, &abort),
            Err(DecodeError::Truncated { .. })
        ));
    }

    #[test]
    fn test_ptag_after_truncated_pols_still_applies() {
        // A full quad, then a triangle record cut off after one index
        let mut bad_pols = b"FACE".to_vec();
        bad_pols.extend(u16s(&[4, 0, 1, 2, 3, 3, 0]));
        let data = form(&[
            tags(&["Red"]),
            unit_quad_points(),
            chunk(*b"POLS", &bad_pols),
            ptag(*b"SURF", &[(0, 1)]),
        ]);
        let tables = decode_tables(&data, &DecodeOptions::default()).unwrap();

        assert_eq!(tables.polygons.len(), 1);
        assert_eq!(tables.assignments.polygons(1), &[0]);

        let object = crate::lwo2::assemble(tables, "test", &DecodeOptions::default());
        assert_eq!(object.child_count(), 1);
        assert_eq!(object.children[0].mesh.triangle_count(), 2);
    }

    #[test]
    fn test_ptag_after_oversized_polygon_still_applies() {
        let data = form(&[
            tags(&["Red"]),
            unit_quad_points(),
            pols(*b"FACE", &[&[0, 1, 2], &[0, 1, 2, 3]]),
            ptag(*b"SURF", &[(0, 1)]),
        ]);
        let options = DecodeOptions {
            max_polygon_vertices: 3,
            ..Default::default()
        };

        let tables = decode_tables(&data, &options).unwrap();
        assert_eq!(tables.polygons.len(), 1);
        assert_eq!(tables.assignments.polygons(1), &[0]);
    }

    #[test]
    fn test_oversized_polygon_skips_chunk() {
        let data = form(&[
            unit_quad_points(),
            pols(*b"FACE", &[&[0, 1, 2], &[0, 1, 2, 3]]),
            tags(&["After"]),
        ]);
        let options = DecodeOptions {
            max_polygon_vertices: 3,
            ..Default::default()
        };

        let tables = decode_tables(&data, &options).unwrap();
        assert_eq!(tables.polygons.len(), 1);
        assert_eq!(tables.tags.name(1), Some("After"));
    }

    #[test]
    fn test_truncated_top_level_header_is_fatal() {
        let mut data = form(&[unit_quad_points()]);
        // Append half a header and patch the FORM length to include it
        data.extend_from_slice(b"POL");
        let form_length = (data.len() - 8) as u32;
        data[4..8].copy_from_slice(&form_length.to_be_bytes());

        assert!(matches!(
            decode_tables(&data, &DecodeOptions::default()),
            Err(DecodeError::Truncated { .. })
        ));
    }

    #[test]
    fn test_bytes_after_form_are_ignored() {
        let mut data = form(&[unit_quad_points()]);
        data.extend_from_slice(b"junk");

        let tables = decode_tables(&data, &DecodeOptions::default()).unwrap();
        assert_eq!(tables.vertices.len(), 4);
    }
}
