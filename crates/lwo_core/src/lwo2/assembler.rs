//! Group triangles by surface and build the object hierarchy.

use std::sync::Arc;

use crate::mesh::{Mesh, Vertex};
use crate::options::DecodeOptions;
use crate::scene::{Material, Object, SurfaceNode};

use super::decoder::DecodedTables;

/// Build the object hierarchy from decoded tables.
///
/// One leaf is produced per tag that has at least one triangle, in
/// ascending tag order. Every leaf mesh shares the same vertex array.
/// Unknown tag names and surfaces resolve to fallbacks, never errors.
pub fn assemble(tables: DecodedTables, name: &str, options: &DecodeOptions) -> Object {
    let DecodedTables {
        vertices,
        polygons,
        tags,
        assignments,
        clips,
        surfaces,
    } = tables;

    let vertices: Arc<[Vertex]> = vertices.into();
    let vertex_count = vertices.len();
    let mut object = Object::new(name, vertices.clone());

    for (tag, polygon_indices) in assignments.iter() {
        let surface_name = match tags.name(tag) {
            Some(name) => name,
            None => {
                log::warn!("Tag index {} has no name; using an anonymous surface", tag);
                ""
            }
        };

        let records: Vec<_> = polygon_indices
            .iter()
            .filter_map(|&index| {
                let record = polygons.get(index);
                if record.is_none() {
                    log::debug!("Tag {} references missing polygon {}", tag, index);
                }
                record
            })
            .collect();

        let capacity = records.iter().map(|r| r.triangles.len()).sum();
        let mut faces: Vec<[u32; 3]> = Vec::with_capacity(capacity);
        let mut dropped = 0usize;
        for triangle in records.iter().flat_map(|r| r.triangles.iter()) {
            if triangle.iter().all(|&i| (i as usize) < vertex_count) {
                faces.push(*triangle);
            } else {
                dropped += 1;
            }
        }
        if dropped > 0 {
            log::warn!(
                "Surface {:?}: dropped {} triangle(s) referencing vertices beyond {}",
                surface_name,
                dropped,
                vertex_count
            );
        }

        if faces.is_empty() {
            log::debug!("Surface {:?} has no triangles; skipping", surface_name);
            continue;
        }

        let mut mesh = Mesh::new(vertices.clone(), faces);
        if options.compute_face_bases {
            mesh.compute_face_bases();
        }

        let material = match surfaces.get(surface_name) {
            Some(surface) => Material::from_surface(surface, |clip| clips.get(clip)),
            None => {
                log::warn!("No SURF record for {:?}; using default material", surface_name);
                Material::unresolved(surface_name)
            }
        };

        object.add_child(SurfaceNode {
            name: surface_name.to_string(),
            mesh,
            material,
        });
    }

    object
}
