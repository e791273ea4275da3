// Re-export glam for convenience
pub use glam::*;

// LWO math types
mod aabb;
mod basis;
pub use aabb::Aabb;
pub use basis::FaceBasis;
