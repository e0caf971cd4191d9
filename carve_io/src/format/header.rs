//! `.vox` header definition.

use carve_core::GridDims;

use crate::error::{CarveIoError, Result};
use crate::grid::MAX_SAMPLES;

/// Header size in bytes.
pub const HEADER_SIZE: usize = 20;

/// Bytes per stored sample.
pub const SAMPLE_SIZE: usize = 4;

/// `.vox` file header.
///
/// Layout (20 bytes, little-endian):
/// - Bytes 0-3: dim_x (i32)
/// - Bytes 4-7: dim_y (i32)
/// - Bytes 8-11: dim_z (i32)
/// - Bytes 12-15: cell_size (f32)
/// - Bytes 16-19: sample_count (i32)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxHeader {
    /// Cells along X.
    pub dim_x: i32,
    /// Cells along Y.
    pub dim_y: i32,
    /// Cells along Z.
    pub dim_z: i32,
    /// World units per cell.
    pub cell_size: f32,
    /// Number of samples that follow the header.
    pub sample_count: i32,
}

impl VoxHeader {
    /// Header describing a grid of `dims` cells.
    ///
    /// `dims` must already satisfy the grid size limit.
    pub fn new(dims: GridDims, cell_size: f32) -> Self {
        Self {
            dim_x: dims.x as i32,
            dim_y: dims.y as i32,
            dim_z: dims.z as i32,
            cell_size,
            sample_count: dims.sample_count() as i32,
        }
    }

    /// Serialize the header to a byte array.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.dim_x.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.dim_y.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.dim_z.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.cell_size.to_le_bytes());
        bytes[16..20].copy_from_slice(&self.sample_count.to_le_bytes());
        bytes
    }

    /// Deserialize a header from a byte array. Performs no validation.
    pub fn from_bytes(bytes: &[u8; HEADER_SIZE]) -> Self {
        let word = |at: usize| [bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]];
        Self {
            dim_x: i32::from_le_bytes(word(0)),
            dim_y: i32::from_le_bytes(word(4)),
            dim_z: i32::from_le_bytes(word(8)),
            cell_size: f32::from_le_bytes(word(12)),
            sample_count: i32::from_le_bytes(word(16)),
        }
    }

    /// Check the header describes a loadable grid.
    ///
    /// Returns the dimensions and sample count on success.
    pub fn validate(&self) -> Result<(GridDims, usize)> {
        if self.dim_x < 0 || self.dim_y < 0 || self.dim_z < 0 {
            return Err(CarveIoError::corrupt(format!(
                "negative dimensions {}x{}x{}",
                self.dim_x, self.dim_y, self.dim_z
            )));
        }
        if self.sample_count <= 0 || self.sample_count as usize > MAX_SAMPLES {
            return Err(CarveIoError::corrupt(format!(
                "sample count {} outside (0, {}]",
                self.sample_count, MAX_SAMPLES
            )));
        }
        let dims = GridDims::new(self.dim_x as u32, self.dim_y as u32, self.dim_z as u32);
        let expected =
            (dims.x as u64 + 1) * (dims.y as u64 + 1) * (dims.z as u64 + 1);
        if expected != self.sample_count as u64 {
            return Err(CarveIoError::corrupt(format!(
                "sample count {} does not match dimensions {}x{}x{} ({} expected)",
                self.sample_count, dims.x, dims.y, dims.z, expected
            )));
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(CarveIoError::corrupt(format!(
                "cell size {} is not positive",
                self.cell_size
            )));
        }
        Ok((dims, self.sample_count as usize))
    }
}

/// Encoded size in bytes of a grid with `dims` cells.
pub fn encoded_len(dims: GridDims) -> usize {
    HEADER_SIZE + dims.sample_count() * SAMPLE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_roundtrip() {
        let header = VoxHeader::new(GridDims::new(3, 4, 5), 0.25);
        assert_eq!(header.sample_count, 120);
        let restored = VoxHeader::from_bytes(&header.to_bytes());
        assert_eq!(header, restored);
        assert_eq!(restored.validate().unwrap(), (GridDims::new(3, 4, 5), 120));
    }

    #[test]
    fn test_header_byte_layout() {
        let bytes = VoxHeader::new(GridDims::new(1, 2, 3), 1.0).to_bytes();
        assert_eq!(&bytes[0..4], &[1, 0, 0, 0]);
        assert_eq!(&bytes[8..12], &[3, 0, 0, 0]);
        assert_eq!(&bytes[12..16], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[16..20], &[24, 0, 0, 0]);
    }

    #[test]
    fn test_validate_rejections() {
        let good = VoxHeader::new(GridDims::cube(2), 0.5);

        let mut h = good;
        h.dim_y = -1;
        assert!(matches!(h.validate(), Err(CarveIoError::CorruptData { .. })));

        let mut h = good;
        h.sample_count = -5;
        assert!(h.validate().is_err());

        let mut h = good;
        h.sample_count = 0;
        assert!(h.validate().is_err());

        let mut h = good;
        h.sample_count = 10_000_001;
        assert!(h.validate().is_err());

        let mut h = good;
        h.sample_count = 26;
        assert!(h.validate().is_err());

        let mut h = good;
        h.cell_size = 0.0;
        assert!(h.validate().is_err());

        let mut h = good;
        h.cell_size = -0.5;
        assert!(h.validate().is_err());
    }

    #[test]
    fn test_encoded_len() {
        assert_eq!(encoded_len(GridDims::cube(1)), 20 + 8 * 4);
        assert_eq!(encoded_len(GridDims::new(0, 0, 0)), 24);
    }
}
