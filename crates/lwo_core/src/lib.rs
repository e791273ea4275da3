//! LWO Core - LightWave object decoding for real-time rendering.
//!
//! This crate provides:
//!
//! - **LWO2 decoding**: chunk walking, point/polygon/tag/clip/surface tables
//! - **Object model**: `Object`, `SurfaceNode`, `Mesh`, `Material`
//!
//! # Example
//!
//! ```ignore
//! use lwo_core::lwo2::load_lwo;
//!
//! // Load an object and issue one draw per surface
//! let object = load_lwo("crate.lwo")?;
//! println!("Loaded {} surfaces, {} triangles",
//!     object.child_count(),
//!     object.total_triangle_count());
//! ```

pub mod lwo2;
pub mod mesh;
pub mod options;
pub mod scene;

// Re-export commonly used types
pub use lwo2::{load_lwo, load_lwo_from_bytes, load_lwo_with_options, DecodeError, DecodeResult};
pub use mesh::{Mesh, Vertex};
pub use options::{DecodeOptions, TruncationPolicy};
pub use scene::{Material, Object, SurfaceNode};
