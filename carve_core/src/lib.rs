//! # carve_core
//!
//! Pure geometry for dense signed-distance voxel fields.
//!
//! This crate holds everything that needs no storage and no allocation:
//!
//! - [`types`]: `Point3` and `GridDims`
//! - [`coords`]: linear sample indexing (`z * (Dx+1) * (Dy+1) + y * (Dx+1) + x`)
//! - [`geometry`]: closest point on a triangle, ray/triangle intersection, AABBs
//! - [`marching_cubes`]: case tables and per-cell triangulation
//! - [`traits`]: the `SampleProvider` seam between storage and extraction
//! - [`hash`]: FNV-1a for deterministic placeholder colours
//!
//! ## Sign convention
//!
//! Samples are positive inside the source surface and negative outside. The
//! marching-cubes corner mask sets bit `i` when `corner[i] <= iso_level`.
//!
//! ## Feature Flags
//!
//! - `std` (default): implements `std::error::Error` for [`CarveCoreError`]

#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]

#[cfg(feature = "std")]
extern crate std;

pub mod coords;
pub mod error;
pub mod geometry;
pub mod hash;
pub mod marching_cubes;
pub mod traits;
pub mod types;

/// Commonly used items.
pub mod prelude {
    pub use crate::coords::{checked_sample_index, sample_coord, sample_index};
    pub use crate::error::CarveCoreError;
    pub use crate::geometry::{
        closest_point_on_triangle, face_normal, point_triangle_distance,
        ray_triangle_intersection, Aabb,
    };
    pub use crate::marching_cubes::{process_cell, CellTriangles, MarchSettings};
    pub use crate::traits::SampleProvider;
    pub use crate::types::{GridDims, Point3};
}

pub use coords::{checked_sample_count, checked_sample_index, sample_coord, sample_index};
pub use error::CarveCoreError;
pub use geometry::{
    closest_point_on_triangle, face_normal, point_triangle_distance, ray_triangle_intersection,
    Aabb,
};
pub use hash::{fnv1a_32, hashed_color};
pub use traits::SampleProvider;
pub use types::{GridDims, Point3};
