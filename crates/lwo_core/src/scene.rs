//! Decoded object hierarchy.
//!
//! A decoded LWO2 file becomes one [`Object`] root with one
//! [`SurfaceNode`] leaf per surface, each carrying a mesh and a material.
//! Nothing here depends on a graphics API.

use std::sync::Arc;

use lwo_math::{Aabb, Vec3, Vec4};

use crate::lwo2::surfaces::SurfaceRecord;
use crate::mesh::{Mesh, Vertex};

/// Base color of a surface that was defined without a `COLR` sub-chunk
/// (LightWave's stock surface color, 200/255 grey).
pub const DEFAULT_SURFACE_COLOR: Vec3 = Vec3::splat(200.0 / 255.0);

/// A surface material resolved from a `SURF` record.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Surface name
    pub name: String,

    /// Base color (RGB, 0-1) with alpha from transparency
    pub base_color: Vec4,

    /// Diffuse factor (0-1)
    pub diffuse: f32,

    /// Specular factor (0-1)
    pub specular: f32,

    /// Luminosity (self-illumination, 0-1)
    pub luminosity: f32,

    /// Clip indices referenced by texture blocks (0-based)
    pub clip_indices: Vec<u32>,

    /// Image paths resolved from `clip_indices`, in the same order,
    /// skipping clips that were not found
    pub image_paths: Vec<String>,

    /// False when no `SURF` record matched and this is a fallback
    pub defined: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            base_color: Vec4::new(0.5, 0.5, 0.5, 1.0), // Grey default
            diffuse: 1.0,
            specular: 0.0,
            luminosity: 0.0,
            clip_indices: Vec::new(),
            image_paths: Vec::new(),
            defined: false,
        }
    }
}

impl Material {
    /// Fallback material for a surface name with no `SURF` record.
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Build a material from a decoded surface record.
    ///
    /// `resolve_clip` maps a 0-based clip index to an image path.
    pub fn from_surface<'a, F>(surface: &SurfaceRecord, resolve_clip: F) -> Self
    where
        F: Fn(u32) -> Option<&'a str>,
    {
        let rgb = surface.color.unwrap_or(DEFAULT_SURFACE_COLOR);
        let alpha = 1.0 - surface.transparency.unwrap_or(0.0).clamp(0.0, 1.0);

        let mut image_paths = Vec::new();
        for &clip in &surface.clip_indices {
            match resolve_clip(clip) {
                Some(path) => image_paths.push(path.to_string()),
                None => log::warn!(
                    "Surface {:?} references clip {} which was not defined",
                    surface.name,
                    clip
                ),
            }
        }

        Self {
            name: surface.name.clone(),
            base_color: rgb.extend(alpha),
            diffuse: surface.diffuse.unwrap_or(1.0),
            specular: surface.specular.unwrap_or(0.0),
            luminosity: surface.luminosity.unwrap_or(0.0),
            clip_indices: surface.clip_indices.clone(),
            image_paths,
            defined: true,
        }
    }

    /// Check if this material references any images.
    pub fn has_textures(&self) -> bool {
        !self.clip_indices.is_empty()
    }

    /// Check if this material is partially transparent.
    pub fn is_transparent(&self) -> bool {
        self.base_color.w < 1.0
    }
}

/// A leaf: the triangles of one surface and its material.
#[derive(Clone, Debug)]
pub struct SurfaceNode {
    /// Surface name (empty for an unnamed tag)
    pub name: String,

    /// Triangles over the object's shared vertex array
    pub mesh: Mesh,

    pub material: Material,
}

/// The root of a decoded file.
#[derive(Clone, Debug)]
pub struct Object {
    /// Object name (usually from filename)
    pub name: String,

    /// Vertex array shared by every child mesh
    pub vertices: Arc<[Vertex]>,

    /// One leaf per surface, in ascending tag order
    pub children: Vec<SurfaceNode>,
}

impl Object {
    /// Create an object with no surfaces.
    pub fn new(name: impl Into<String>, vertices: Arc<[Vertex]>) -> Self {
        Self {
            name: name.into(),
            vertices,
            children: Vec::new(),
        }
    }

    /// Attach a surface leaf.
    pub fn add_child(&mut self, child: SurfaceNode) {
        self.children.push(child);
    }

    /// Find a leaf by surface name.
    pub fn find(&self, name: &str) -> Option<&SurfaceNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Get surface count.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Get the number of vertices in the shared array.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get total triangle count across all surfaces.
    pub fn total_triangle_count(&self) -> usize {
        self.children.iter().map(|c| c.mesh.triangle_count()).sum()
    }

    /// Bounds of every surface mesh.
    pub fn bounds(&self) -> Aabb {
        self.children
            .iter()
            .fold(Aabb::EMPTY, |acc, c| acc.union(&c.mesh.bounds))
    }
}
