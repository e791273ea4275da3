//! Mesh geometry produced by the LWO2 decoder.
//!
//! A decoded object has a single vertex array. Each surface gets its own
//! [`Mesh`] that shares that array and owns only its triangle list, so one
//! vertex buffer can be uploaded once and drawn with one index buffer per
//! material.

use std::sync::Arc;

use lwo_math::{Aabb, FaceBasis, Vec3};

/// GPU-ready vertex: homogeneous position plus RGBA color.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 4],
    pub color: [f32; 4],
}

impl Vertex {
    /// Default vertex color (opaque white).
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    /// Create a vertex at `position` with `w = 1` and the default color.
    pub fn new(position: [f32; 3]) -> Self {
        Self {
            position: [position[0], position[1], position[2], 1.0],
            color: Self::WHITE,
        }
    }

    /// Position without the homogeneous coordinate.
    pub fn position3(&self) -> Vec3 {
        Vec3::new(self.position[0], self.position[1], self.position[2])
    }
}

/// A triangle list over a shared vertex array.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex array shared with every other mesh of the same object
    pub vertices: Arc<[Vertex]>,

    /// Triangles (three indices into `vertices` each)
    pub faces: Vec<[u32; 3]>,

    /// Per-face normal/tangent frames (empty until computed)
    pub face_bases: Vec<FaceBasis>,

    /// Bounds of the vertices referenced by `faces`
    pub bounds: Aabb,
}

impl Mesh {
    /// Create a mesh over `vertices` from a triangle list.
    ///
    /// Faces referencing a vertex outside `vertices` are tolerated: they
    /// add nothing to the bounds or normals and get a degenerate basis.
    pub fn new(vertices: Arc<[Vertex]>, faces: Vec<[u32; 3]>) -> Self {
        let bounds = Self::compute_bounds(&vertices, &faces);
        Self {
            vertices,
            faces,
            face_bases: Vec::new(),
            bounds,
        }
    }

    /// Compute bounds over the vertices the faces actually use.
    fn compute_bounds(vertices: &[Vertex], faces: &[[u32; 3]]) -> Aabb {
        Aabb::from_points(
            faces
                .iter()
                .flatten()
                .filter_map(|&i| vertices.get(i as usize))
                .map(Vertex::position3),
        )
    }

    /// Corner positions of a face, if all three indices are in range.
    fn face_positions(&self, [i0, i1, i2]: [u32; 3]) -> Option<[Vec3; 3]> {
        let position = |i: u32| self.vertices.get(i as usize).map(Vertex::position3);
        Some([position(i0)?, position(i1)?, position(i2)?])
    }

    /// Compute the normal/tangent frame of every face.
    pub fn compute_face_bases(&mut self) {
        self.face_bases = self
            .faces
            .iter()
            .map(|&face| match self.face_positions(face) {
                Some([p0, p1, p2]) => FaceBasis::from_triangle(p0, p1, p2),
                None => FaceBasis::DEGENERATE,
            })
            .collect();
    }

    /// Compute smooth vertex normals by averaging area-weighted face normals.
    ///
    /// The result has one entry per vertex of the shared array; vertices
    /// this mesh does not reference get `Vec3::Y`.
    pub fn compute_vertex_normals(&self) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];

        for &face in &self.faces {
            let Some([p0, p1, p2]) = self.face_positions(face) else {
                continue;
            };
            let [i0, i1, i2] = face;

            let face_normal = (p2 - p0).cross(p1 - p0);
            normals[i0 as usize] += face_normal;
            normals[i1 as usize] += face_normal;
            normals[i2 as usize] += face_normal;
        }

        for normal in &mut normals {
            *normal = normal.try_normalize().unwrap_or(Vec3::Y);
        }
        normals
    }

    /// Check if face bases have been computed.
    pub fn has_face_bases(&self) -> bool {
        !self.faces.is_empty() && self.face_bases.len() == self.faces.len()
    }

    /// Flatten faces into a `u32` index buffer (three per triangle).
    pub fn index_buffer(&self) -> Vec<u32> {
        self.faces.iter().flatten().copied().collect()
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Get the number of vertices in the shared array.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}
