use crate::Vec3;

/// Orthonormal frame of a single triangle.
///
/// Without texture coordinates the tangent follows the first edge
/// `p1 - p0`; the bitangent completes a right-handed frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FaceBasis {
    pub normal: Vec3,
    pub tangent: Vec3,
    pub bitangent: Vec3,
}

impl FaceBasis {
    /// Frame used for degenerate (zero-area) triangles.
    pub const DEGENERATE: FaceBasis = FaceBasis {
        normal: Vec3::Y,
        tangent: Vec3::X,
        bitangent: Vec3::Z,
    };

    /// Compute the basis of triangle `(p0, p1, p2)`.
    ///
    /// LightWave polygons are wound clockwise when seen from the front, so
    /// the normal is `e2 x e1`.
    pub fn from_triangle(p0: Vec3, p1: Vec3, p2: Vec3) -> Self {
        let edge1 = p1 - p0;
        let edge2 = p2 - p0;

        let normal = match edge2.cross(edge1).try_normalize() {
            Some(n) => n,
            None => return Self::DEGENERATE,
        };

        // Gram-Schmidt the first edge against the normal
        let tangent = (edge1 - normal * normal.dot(edge1))
            .try_normalize()
            .unwrap_or_else(|| normal.any_orthonormal_vector());
        let bitangent = normal.cross(tangent);

        Self {
            normal,
            tangent,
            bitangent,
        }
    }
}
