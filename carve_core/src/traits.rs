//! Storage abstraction for marching-cubes extraction.

use crate::types::GridDims;

/// Read access to a dense grid of scalar samples.
///
/// Implemented by the voxel grid in `carve_io`; tests implement it over
/// analytic functions.
pub trait SampleProvider {
    /// Cell counts of the grid. Valid sample coordinates are `0..=dims`.
    fn dims(&self) -> GridDims;

    /// Scalar value at sample `(x, y, z)`.
    ///
    /// Callers guarantee the coordinate is in range.
    fn sample(&self, x: u32, y: u32, z: u32) -> f32;
}

impl<T: SampleProvider + ?Sized> SampleProvider for &T {
    #[inline]
    fn dims(&self) -> GridDims {
        (**self).dims()
    }

    #[inline]
    fn sample(&self, x: u32, y: u32, z: u32) -> f32 {
        (**self).sample(x, y, z)
    }
}
