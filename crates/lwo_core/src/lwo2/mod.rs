//! LightWave Object (LWO2) support.
//!
//! This module decodes LWO2 files into an [`Object`] with one mesh per
//! surface.
//!
//! ## Supported chunks
//!
//! - `PNTS`: vertex positions (several layers are concatenated)
//! - `POLS`: `FACE` polygons (and `PTCH` when enabled), fan-triangulated
//! - `TAGS` / `PTAG` (`SURF`): surface assignment per polygon
//! - `CLIP` (`STIL`): still-image clips
//! - `SURF`: `COLR`, `DIFF`, `LUMI`, `SPEC`, `TRAN` and `BLOK`/`IMAG`
//!
//! Everything else (`LAYR`, `VMAP`, `VMAD`, `BBOX`, envelopes, ...) is
//! skipped by its declared length.
//!
//! # Example
//!
//! ```ignore
//! use lwo_core::lwo2::load_lwo;
//!
//! let object = load_lwo("models/crate.lwo")?;
//! for surface in &object.children {
//!     println!("{}: {} triangles", surface.name, surface.mesh.triangle_count());
//! }
//! ```

mod error;

pub mod assembler;
pub mod chunk;
pub mod clips;
pub mod cursor;
pub mod decoder;
pub mod points;
pub mod polygons;
pub mod surfaces;
pub mod tags;

#[cfg(test)]
pub(crate) mod test_util;

use std::path::Path;

use crate::options::DecodeOptions;
use crate::scene::Object;

pub use assembler::assemble;
pub use decoder::{decode_tables, DecodedTables};
pub use error::{DecodeError, DecodeResult};

/// Load an LWO2 file with default options.
pub fn load_lwo<P: AsRef<Path>>(path: P) -> DecodeResult<Object> {
    load_lwo_with_options(path, &DecodeOptions::default())
}

/// Load an LWO2 file.
///
/// The object is named after the file stem.
pub fn load_lwo_with_options<P: AsRef<Path>>(path: P, options: &DecodeOptions) -> DecodeResult<Object> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");

    let data = std::fs::read(path)?;
    load_lwo_from_bytes(&data, name, options)
}

/// Decode an in-memory LWO2 stream into an object named `name`.
pub fn load_lwo_from_bytes(data: &[u8], name: &str, options: &DecodeOptions) -> DecodeResult<Object> {
    let tables = decode_tables(data, options)?;
    let vertex_count = tables.vertices.len();
    let polygon_count = tables.polygons.len();

    let object = assemble(tables, name, options);
    log::info!(
        "Loaded {}: {} vertices, {} polygons, {} surfaces, {} triangles",
        name,
        vertex_count,
        polygon_count,
        object.child_count(),
        object.total_triangle_count()
    );
    Ok(object)
}
