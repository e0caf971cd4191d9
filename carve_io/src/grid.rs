//! Dense signed-distance voxel grid.
//!
//! Samples sit on the corners of `dims` cells, so there are
//! `(Dx+1) * (Dy+1) * (Dz+1)` of them, laid out X-fastest. Positive values
//! are inside the source surface, negative outside; magnitudes are world-unit
//! distances.
//!
//! The grid frame is world space: `origin` is the world position of sample
//! `(0, 0, 0)` and `cell_size` is in world units.

use carve_core::{
    checked_sample_count, sample_coord, sample_index, Aabb, GridDims, Point3, SampleProvider,
};

use crate::error::{CarveIoError, Result};
use crate::placement::Placement;
use crate::sampler::DistanceSampler;

/// Largest sample count a grid may hold.
pub const MAX_SAMPLES: usize = 10_000_000;

/// Default carve depth, in cells below the surface.
pub const DEFAULT_CARVE_DEPTH: f32 = 2.0;

/// Dense scalar field with per-sample edit flags.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelGrid {
    dims: GridDims,
    cell_size: f32,
    origin: Point3,
    samples: Vec<f32>,
    edited: Vec<bool>,
}

/// Validate a grid layout and return its sample count, before any allocation.
pub fn check_layout(dims: GridDims, cell_size: f32) -> Result<usize> {
    if !(cell_size.is_finite() && cell_size > 0.0) {
        return Err(CarveIoError::invalid_config(format!(
            "cell size must be finite and > 0, got {}",
            cell_size
        )));
    }
    let requested =
        (dims.x as u64 + 1) * (dims.y as u64 + 1) * (dims.z as u64 + 1);
    if requested > MAX_SAMPLES as u64 {
        return Err(CarveIoError::GridTooLarge {
            samples: requested,
            limit: MAX_SAMPLES,
        });
    }
    Ok(checked_sample_count(dims)?)
}

impl VoxelGrid {
    /// All-zero grid.
    ///
    /// # Errors
    /// `InvalidConfig` for a non-positive cell size, `GridTooLarge` above
    /// [`MAX_SAMPLES`].
    pub fn new(dims: GridDims, cell_size: f32, origin: Point3) -> Result<Self> {
        let count = check_layout(dims, cell_size)?;
        Ok(Self {
            dims,
            cell_size,
            origin,
            samples: vec![0.0; count],
            edited: vec![false; count],
        })
    }

    /// Grid over existing sample values; edit flags start cleared.
    pub fn from_samples(
        dims: GridDims,
        cell_size: f32,
        origin: Point3,
        samples: Vec<f32>,
    ) -> Result<Self> {
        let count = check_layout(dims, cell_size)?;
        if samples.len() != count {
            return Err(CarveIoError::invalid_config(format!(
                "{} samples supplied for dims {}x{}x{} ({} expected)",
                samples.len(),
                dims.x,
                dims.y,
                dims.z,
                count
            )));
        }
        Ok(Self {
            dims,
            cell_size,
            origin,
            samples,
            edited: vec![false; count],
        })
    }

    /// Cell counts per axis.
    #[inline]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// World units per cell.
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// World position of sample `(0, 0, 0)`.
    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Sample values in index order.
    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Edit flags in index order.
    #[inline]
    pub fn edited(&self) -> &[bool] {
        &self.edited
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; a grid holds at least one sample.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Linear index of `(x, y, z)`.
    #[inline]
    pub fn index(&self, x: u32, y: u32, z: u32) -> usize {
        sample_index(self.dims, x, y, z)
    }

    /// Coordinate of linear index `index`.
    #[inline]
    pub fn coord(&self, index: usize) -> (u32, u32, u32) {
        sample_coord(self.dims, index)
    }

    /// Value at `(x, y, z)`. Panics when out of range.
    #[inline]
    pub fn get(&self, x: u32, y: u32, z: u32) -> f32 {
        self.samples[self.index(x, y, z)]
    }

    /// Value at `(x, y, z)`, or `None` when out of range.
    #[inline]
    pub fn try_get(&self, x: u32, y: u32, z: u32) -> Option<f32> {
        if self.dims.contains_sample(x, y, z) {
            Some(self.samples[sample_index(self.dims, x, y, z)])
        } else {
            None
        }
    }

    /// Overwrite the value at `(x, y, z)`. Panics when out of range.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, z: u32, value: f32) {
        let i = self.index(x, y, z);
        self.samples[i] = value;
    }

    /// Whether `(x, y, z)` has been carved since the last build, load or clear.
    #[inline]
    pub fn is_edited(&self, x: u32, y: u32, z: u32) -> bool {
        self.edited[self.index(x, y, z)]
    }

    /// World position of sample `(x, y, z)`.
    #[inline]
    pub fn sample_position(&self, x: u32, y: u32, z: u32) -> Point3 {
        self.origin + Point3::new(x as f32, y as f32, z as f32) * self.cell_size
    }

    /// World-space box spanned by the samples.
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            self.origin,
            self.sample_position(self.dims.x, self.dims.y, self.dims.z),
        )
    }

    /// Resample every value from `sampler`.
    ///
    /// Each sample's world position is mapped into mesh-local space through
    /// `placement`; the signed distance is scaled back to world units. Edit
    /// flags are cleared. Returns the number of inside samples.
    pub fn build(&mut self, sampler: &DistanceSampler, placement: &Placement) -> usize {
        let (sx, sy, _) = self.dims.samples_per_axis();
        let slab_len = sx * sy;
        let origin = self.origin;
        let cell_size = self.cell_size;
        let fill_slab = |z: usize, slab: &mut [f32]| {
            for (i, value) in slab.iter_mut().enumerate() {
                let x = (i % sx) as f32;
                let y = (i / sx) as f32;
                let world = origin + Point3::new(x, y, z as f32) * cell_size;
                *value = sampler.signed_distance(placement.to_local(world)) * placement.scale;
            }
        };

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            self.samples
                .par_chunks_mut(slab_len)
                .enumerate()
                .for_each(|(z, slab)| fill_slab(z, slab));
        }
        #[cfg(not(feature = "parallel"))]
        {
            self.samples
                .chunks_mut(slab_len)
                .enumerate()
                .for_each(|(z, slab)| fill_slab(z, slab));
        }

        self.clear_edits();
        let inside = self.inside_count();
        log::info!(
            "built {}x{}x{} grid: {} of {} samples inside",
            self.dims.x,
            self.dims.y,
            self.dims.z,
            inside,
            self.samples.len()
        );
        inside
    }

    /// Push every sample strictly within `radius * placement.scale` of the
    /// world point `center` to at most `-depth * cell_size` and flag it.
    ///
    /// Other samples are untouched. Returns the number of samples affected.
    pub fn carve(&mut self, center: Point3, radius: f32, placement: &Placement, depth: f32) -> usize {
        let reach = radius * placement.scale;
        if reach.is_nan() || reach <= 0.0 {
            return 0;
        }
        let floor = -depth * self.cell_size;
        let mut affected = 0;

        // Only visit the samples inside the sphere's bounding box.
        let hi = (center + Point3::splat(reach) - self.origin) / self.cell_size;
        if hi.x < 0.0 || hi.y < 0.0 || hi.z < 0.0 {
            return 0;
        }
        let lo = (center - Point3::splat(reach) - self.origin) / self.cell_size;
        let clamp = |v: f32, max: u32| -> u32 { v.max(0.0).min(max as f32) as u32 };
        let (x0, x1) = (clamp(libm::floorf(lo.x), self.dims.x), clamp(libm::ceilf(hi.x), self.dims.x));
        let (y0, y1) = (clamp(libm::floorf(lo.y), self.dims.y), clamp(libm::ceilf(hi.y), self.dims.y));
        let (z0, z1) = (clamp(libm::floorf(lo.z), self.dims.z), clamp(libm::ceilf(hi.z), self.dims.z));

        for z in z0..=z1 {
            for y in y0..=y1 {
                for x in x0..=x1 {
                    if self.sample_position(x, y, z).distance(center) < reach {
                        let i = self.index(x, y, z);
                        self.samples[i] = self.samples[i].min(floor);
                        self.edited[i] = true;
                        affected += 1;
                    }
                }
            }
        }

        log::debug!(
            "carved {} samples around ({}, {}, {}) radius {}",
            affected,
            center.x,
            center.y,
            center.z,
            reach
        );
        affected
    }

    /// Number of flagged samples.
    pub fn edited_count(&self) -> usize {
        self.edited.iter().filter(|&&e| e).count()
    }

    /// Reset every edit flag.
    pub fn clear_edits(&mut self) {
        self.edited.iter_mut().for_each(|e| *e = false);
    }

    /// Number of samples with a positive value.
    pub fn inside_count(&self) -> usize {
        self.samples.iter().filter(|&&v| v > 0.0).count()
    }
}

impl SampleProvider for VoxelGrid {
    #[inline]
    fn dims(&self) -> GridDims {
        self.dims
    }

    #[inline]
    fn sample(&self, x: u32, y: u32, z: u32) -> f32 {
        self.get(x, y, z)
    }
}
