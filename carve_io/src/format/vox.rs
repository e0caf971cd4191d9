//! `.vox` binary format read/write implementation.
//!
//! # Format Specification
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │ HEADER (20 bytes, little-endian)                                   │
//! ├────────────────────────────────────────────────────────────────────┤
//! │  0-3:   dim_x (i32)                                                │
//! │  4-7:   dim_y (i32)                                                │
//! │  8-11:  dim_z (i32)                                                │
//! │ 12-15:  cell_size (f32)                                            │
//! │ 16-19:  sample_count (i32) = (dim_x+1)(dim_y+1)(dim_z+1)           │
//! ├────────────────────────────────────────────────────────────────────┤
//! │ SAMPLES                                                            │
//! │  sample_count × f32 (LE), grid index order (X fastest)             │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The grid origin and edit flags are not stored.

use std::io::{ErrorKind, Read, Write};

use carve_core::Point3;

use super::header::{VoxHeader, HEADER_SIZE, SAMPLE_SIZE};
use crate::error::{CarveIoError, Result};
use crate::grid::VoxelGrid;

/// Write `grid` to `writer` in `.vox` format.
pub fn save_grid<W: Write>(grid: &VoxelGrid, writer: &mut W) -> Result<()> {
    let header = VoxHeader::new(grid.dims(), grid.cell_size());
    writer.write_all(&header.to_bytes())?;

    let mut bytes = Vec::with_capacity(grid.len() * SAMPLE_SIZE);
    for &value in grid.samples() {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    writer.write_all(&bytes)?;
    Ok(())
}

/// Read a `.vox` stream into a fresh grid whose sample `(0, 0, 0)` sits at
/// `origin`.
///
/// Nothing is returned unless the whole stream validates, so a caller that
/// only swaps the result in on `Ok` never observes partial data.
///
/// # Errors
/// `CorruptData` for negative dimensions, a sample count outside
/// `(0, MAX_SAMPLES]` or not matching the dimensions, a non-positive cell
/// size, or a truncated payload.
pub fn load_grid<R: Read>(reader: &mut R, origin: Point3) -> Result<VoxelGrid> {
    let mut header_bytes = [0u8; HEADER_SIZE];
    read_exact_or_corrupt(reader, &mut header_bytes, "header")?;
    let header = VoxHeader::from_bytes(&header_bytes);
    let (dims, count) = header.validate()?;

    let mut bytes = vec![0u8; count * SAMPLE_SIZE];
    read_exact_or_corrupt(reader, &mut bytes, "sample payload")?;
    let samples: Vec<f32> = bytes
        .chunks_exact(SAMPLE_SIZE)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    log::info!(
        "loaded {}x{}x{} grid ({} samples, cell size {})",
        dims.x,
        dims.y,
        dims.z,
        count,
        header.cell_size
    );
    VoxelGrid::from_samples(dims, header.cell_size, origin, samples)
}

fn read_exact_or_corrupt<R: Read>(reader: &mut R, buf: &mut [u8], what: &str) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => CarveIoError::corrupt(format!("truncated {}", what)),
        _ => CarveIoError::Io(e),
    })
}

/// Save a grid to a file path.
pub fn save_to_file<P: AsRef<std::path::Path>>(grid: &VoxelGrid, path: P) -> Result<()> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    save_grid(grid, &mut file)?;
    file.flush()?;
    Ok(())
}

/// Load a grid from a file path.
pub fn load_from_file<P: AsRef<std::path::Path>>(path: P, origin: Point3) -> Result<VoxelGrid> {
    let mut file = std::io::BufReader::new(std::fs::File::open(path)?);
    load_grid(&mut file, origin)
}
