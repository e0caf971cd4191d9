//! Spatial acceleration structures.
//!
//! - [`TriangleBvh`]: nearest-triangle and ray-crossing queries over a
//!   [`ReferenceMesh`](crate::mesh::ReferenceMesh)

mod bvh;

pub use bvh::{RayHit, TriangleBvh};
