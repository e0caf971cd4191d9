//! `.vox` file format support.
//!
//! A fixed little-endian layout: five header words followed by the raw
//! samples. See [`vox`] for the byte map.
//!
//! # Example
//!
//! ```ignore
//! use carve_io::{load_grid, save_grid};
//! use std::fs::File;
//!
//! let mut file = File::create("body.vox")?;
//! save_grid(&grid, &mut file)?;
//!
//! let mut file = File::open("body.vox")?;
//! let loaded = load_grid(&mut file, grid.origin())?;
//! ```

pub mod header;
pub mod vox;

pub use header::{encoded_len, VoxHeader, HEADER_SIZE, SAMPLE_SIZE};
pub use vox::{load_from_file, load_grid, save_grid, save_to_file};
