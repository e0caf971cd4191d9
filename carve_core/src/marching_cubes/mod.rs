//! Marching-cubes surface extraction.
//!
//! - [`tables`]: the 256-case lookup tables, compile-time constants
//! - per-cell classification, edge interpolation and triangulation
//!
//! # Example
//!
//! ```ignore
//! use carve_core::marching_cubes::{process_cell, MarchSettings};
//!
//! let tris = process_cell(&grid, 3, 4, 5, &MarchSettings::default());
//! for tri in tris.as_slice() {
//!     // grid-unit positions
//! }
//! ```

mod algorithm;
pub mod tables;

pub use algorithm::{
    edge_mask, gather_corners, interpolation_offset, march_cell, process_cell, vertex_mask,
    CellTriangles, MarchSettings, MAX_CELL_TRIANGLES,
};
pub use tables::{CORNER_OFFSETS, EDGE_DIRECTIONS, EDGE_TABLE, EDGE_VERTICES, TRI_TABLE};
