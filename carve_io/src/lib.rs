//! carve_io - reference meshes, distance sampling, dense voxel grids and
//! their persisted form.
//!
//! # Core Types
//!
//! - [`ReferenceMesh`]: validated, immutable source triangles
//! - [`TriangleBvh`]: nearest-triangle and ray-crossing acceleration
//! - [`DistanceSampler`]: closest distance + ray-vote inside test
//! - [`VoxelGrid`]: dense signed-distance samples with build and carve
//! - [`Placement`]: mesh-local to world transform
//!
//! # Example
//!
//! ```ignore
//! use carve_io::{parse_obj_file, DistanceSampler, GridDims, Placement, SamplerConfig, VoxelGrid};
//!
//! let mesh = parse_obj_file("statue.obj")?;
//! let sampler = DistanceSampler::new(mesh, SamplerConfig::default())?;
//! let mut grid = VoxelGrid::new(GridDims::cube(64), 0.05, origin)?;
//! grid.build(&sampler, &Placement::IDENTITY);
//! grid.carve(impact, 0.3, &Placement::IDENTITY, 2.0);
//! ```
//!
//! # Crate Features
//!
//! - `parallel` (default): builds grids over Z-slabs with rayon

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod convert;
pub mod error;
pub mod format;
pub mod grid;
pub mod mesh;
pub mod placement;
pub mod sampler;
pub mod spatial;

// Re-export core types from carve_core
pub use carve_core::{Aabb, GridDims, Point3, SampleProvider};

pub use config::SamplerConfig;
pub use convert::{parse_obj, parse_obj_file};
pub use error::{CarveIoError, Result};
pub use format::{
    encoded_len, load_from_file, load_grid, save_grid, save_to_file, VoxHeader, HEADER_SIZE,
};
pub use grid::{check_layout, VoxelGrid, DEFAULT_CARVE_DEPTH, MAX_SAMPLES};
pub use mesh::ReferenceMesh;
pub use placement::Placement;
pub use sampler::{DistanceSampler, RayVote};
pub use spatial::{RayHit, TriangleBvh};
