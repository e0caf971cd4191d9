//! # carve_rs
//!
//! Destructible mesh runtime: a triangle mesh is voxelized into a dense
//! signed distance grid, spheres are carved out of it, and the surface is
//! re-extracted with marching cubes after every change.
//!
//! ## Quick Start
//!
//! ```ignore
//! use carve_rs::prelude::*;
//!
//! let mesh = parse_obj_file("rock.obj")?;
//! let mut body = VoxelBody::from_mesh(mesh, Placement::IDENTITY, BodyConfig::new(0.05))?;
//!
//! // Blast a hole and hand the new surface to the renderer
//! body.carve(Point3::new(0.2, 0.4, 0.0), 0.15);
//! upload(body.mesh());
//!
//! // Persist the carved state
//! body.save_file("rock.vox")?;
//! ```
//!
//! ## Architecture
//!
//! - `carve_core`: geometry, marching cubes tables and per-cell triangulation
//! - `carve_io`: reference meshes, distance sampling, the voxel grid and the
//!   `.vox` format
//! - `carve_rs` (this crate): full-grid extraction, mesh output and the
//!   [`VoxelBody`] service tying them together
//!
//! Values are positive inside the mesh and negative outside. The grid and
//! every output position are in world units.
//!
//! ## Feature Flags
//!
//! - `parallel` (default): rayon build over Z-slabs and extraction over
//!   X-slabs; output is identical to the sequential passes

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod body;
pub mod config;
pub mod error;
pub mod extract;
pub mod mesh;
pub mod nav;

pub use carve_core::{Aabb, GridDims, Point3};
pub use carve_io::{
    parse_obj, parse_obj_file, CarveIoError, DistanceSampler, Placement, ReferenceMesh,
    SamplerConfig, VoxelGrid, DEFAULT_CARVE_DEPTH, MAX_SAMPLES,
};

pub use body::{grid_dims_for, VoxelBody};
pub use config::BodyConfig;
pub use error::{CarveError, Result};
pub use extract::{extract, extract_into, ColorMode, ExtractConfig};
pub use mesh::{mesh_to_obj, write_obj, ExtractedMesh, MeshStats};
pub use nav::{NavStatus, NavigationSink, NoNavigation};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        parse_obj_file, Aabb, BodyConfig, CarveError, ColorMode, ExtractConfig, ExtractedMesh,
        GridDims, MeshStats, NavStatus, NavigationSink, Placement, Point3, ReferenceMesh,
        VoxelBody, VoxelGrid,
    };
}
