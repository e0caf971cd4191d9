//! Linear indexing of dense sample grids.
//!
//! Samples are laid out X-fastest:
//! `index = z * (Dx+1) * (Dy+1) + y * (Dx+1) + x`.

use crate::error::CarveCoreError;
use crate::types::GridDims;

/// Linear index of sample `(x, y, z)`.
///
/// The coordinate must satisfy `dims.contains_sample(x, y, z)`; this is only
/// checked in debug builds.
#[inline]
pub fn sample_index(dims: GridDims, x: u32, y: u32, z: u32) -> usize {
    debug_assert!(
        dims.contains_sample(x, y, z),
        "sample ({}, {}, {}) outside {:?}",
        x,
        y,
        z,
        dims
    );
    let (sx, sy, _) = dims.samples_per_axis();
    z as usize * sx * sy + y as usize * sx + x as usize
}

/// Bounds-checked variant of [`sample_index`].
#[inline]
pub fn checked_sample_index(
    dims: GridDims,
    x: u32,
    y: u32,
    z: u32,
) -> Result<usize, CarveCoreError> {
    if dims.contains_sample(x, y, z) {
        Ok(sample_index(dims, x, y, z))
    } else {
        Err(CarveCoreError::SampleOutOfBounds {
            coord: (x, y, z),
            max: (dims.x, dims.y, dims.z),
        })
    }
}

/// Inverse of [`sample_index`].
#[inline]
pub fn sample_coord(dims: GridDims, index: usize) -> (u32, u32, u32) {
    let (sx, sy, _) = dims.samples_per_axis();
    let x = index % sx;
    let y = (index / sx) % sy;
    let z = index / (sx * sy);
    (x as u32, y as u32, z as u32)
}

/// Sample count for `dims`, or an error if it overflows `usize`.
pub fn checked_sample_count(dims: GridDims) -> Result<usize, CarveCoreError> {
    let invalid = CarveCoreError::InvalidDims {
        x: dims.x,
        y: dims.y,
        z: dims.z,
    };
    let sx = (dims.x as usize).checked_add(1).ok_or(invalid)?;
    let sy = (dims.y as usize).checked_add(1).ok_or(invalid)?;
    let sz = (dims.z as usize).checked_add(1).ok_or(invalid)?;
    sx.checked_mul(sy)
        .and_then(|v| v.checked_mul(sz))
        .ok_or(invalid)
}
