//! `SURF`: surface (material) records.
//!
//! A surface is two strings followed by sub-chunks. Only the base color,
//! a few scalar shading parameters and the clip references of texture
//! blocks are decoded; everything else is skipped by length.

use std::collections::BTreeMap;

use lwo_math::Vec3;

use crate::options::TruncationPolicy;

use super::chunk::{walk_chunks, ChunkId, LengthWidth};
use super::cursor::ByteCursor;
use super::error::DecodeResult;

/// A decoded `SURF` chunk.
///
/// Optional fields are `None` when the corresponding sub-chunk was absent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceRecord {
    pub name: String,

    /// Parent surface name (decoded but not applied)
    pub source: String,

    /// Base color from `COLR`
    pub color: Option<Vec3>,

    pub diffuse: Option<f32>,
    pub luminosity: Option<f32>,
    pub specular: Option<f32>,
    pub transparency: Option<f32>,

    /// 0-based clip indices from `BLOK`/`IMAG`, in file order
    pub clip_indices: Vec<u32>,
}

/// Surface records keyed by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceTable {
    surfaces: BTreeMap<String, SurfaceRecord>,
}

impl SurfaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a surface, replacing one with the same name.
    pub fn insert(&mut self, surface: SurfaceRecord) {
        if self.surfaces.contains_key(&surface.name) {
            log::warn!("Surface {:?} defined more than once; keeping the last", surface.name);
        }
        self.surfaces.insert(surface.name.clone(), surface);
    }

    pub fn get(&self, name: &str) -> Option<&SurfaceRecord> {
        self.surfaces.get(name)
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

/// Read a `f32` followed by an (unused) envelope index.
fn read_enveloped_scalar(sub: &mut ByteCursor<'_>) -> DecodeResult<f32> {
    let value = sub.read_f32()?;
    sub.read_vx()?;
    Ok(value)
}

/// Collect the clip references of a `BLOK` payload.
fn read_block(
    payload: &mut ByteCursor<'_>,
    policy: TruncationPolicy,
    clip_indices: &mut Vec<u32>,
) -> DecodeResult<()> {
    walk_chunks(payload, LengthWidth::U16, policy, |header, sub| {
        match header.id {
            ChunkId::IMAG => {
                let clip = sub.read_vx()?;
                if clip == 0 {
                    log::debug!("Texture block without an image");
                } else {
                    clip_indices.push(clip - 1);
                }
            }
            other => log::trace!("Skipping BLOK sub-chunk {}", other),
        }
        Ok(())
    })
}

/// Decode a `SURF` payload and register it in `table`.
pub fn read_surface(
    payload: &mut ByteCursor<'_>,
    policy: TruncationPolicy,
    table: &mut SurfaceTable,
) -> DecodeResult<()> {
    let mut surface = SurfaceRecord {
        name: payload.read_string()?,
        source: payload.read_string()?,
        ..Default::default()
    };

    walk_chunks(payload, LengthWidth::U16, policy, |header, sub| {
        match header.id {
            ChunkId::COLR => {
                let [r, g, b] = sub.read_vec3()?;
                surface.color = Some(Vec3::new(r, g, b));
                sub.read_vx()?;
            }
            ChunkId::DIFF => surface.diffuse = Some(read_enveloped_scalar(sub)?),
            ChunkId::LUMI => surface.luminosity = Some(read_enveloped_scalar(sub)?),
            ChunkId::SPEC => surface.specular = Some(read_enveloped_scalar(sub)?),
            ChunkId::TRAN => surface.transparency = Some(read_enveloped_scalar(sub)?),
            ChunkId::BLOK => read_block(sub, policy, &mut surface.clip_indices)?,
            other => log::trace!("Skipping SURF sub-chunk {}", other),
        }
        Ok(())
    })?;

    log::debug!(
        "Surface {:?}: color {:?}, {} texture reference(s)",
        surface.name,
        surface.color,
        surface.clip_indices.len()
    );
    table.insert(surface);
    Ok(())
}
