//! Decoder configuration.

use serde::{Deserialize, Serialize};

/// Largest vertex count a polygon record can encode (10-bit field).
pub const MAX_POLYGON_VERTICES: usize = 0x03FF;

/// What to do when a chunk payload is shorter than its fields require.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruncationPolicy {
    /// Log the failure, skip the rest of the chunk and keep scanning
    #[default]
    SkipChunk,

    /// Abort the whole decode
    Abort,
}

/// Options controlling how an LWO2 stream is decoded.
///
/// Every field has a default, so a JSON document only needs to name the
/// fields it changes:
///
/// ```
/// use lwo_core::options::{DecodeOptions, TruncationPolicy};
///
/// let options = DecodeOptions::from_json_str(r#"{ "truncation": "abort" }"#).unwrap();
/// assert_eq!(options.truncation, TruncationPolicy::Abort);
/// assert_eq!(options.max_polygon_vertices, 1023);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Polygon records with more vertices than this are rejected
    pub max_polygon_vertices: usize,

    /// Recovery policy for truncated or malformed chunk payloads
    pub truncation: TruncationPolicy,

    /// Decode `PTCH` (subdivision cage) polygons like plain faces
    pub accept_patches: bool,

    /// Compute per-face normal/tangent frames during assembly
    pub compute_face_bases: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_polygon_vertices: MAX_POLYGON_VERTICES,
            truncation: TruncationPolicy::SkipChunk,
            accept_patches: false,
            compute_face_bases: true,
        }
    }
}

impl DecodeOptions {
    /// Parse options from a JSON document.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
