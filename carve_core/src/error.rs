//! Error types for carve_core operations.
//!
//! Hand-written so the crate stays `no_std`.

use core::fmt;

/// Errors that can occur during carve_core operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarveCoreError {
    /// A sample coordinate lies outside `[0, dims]` on some axis.
    SampleOutOfBounds {
        /// Requested coordinate.
        coord: (u32, u32, u32),
        /// Inclusive maximum coordinate.
        max: (u32, u32, u32),
    },
    /// The dimensions describe a grid whose sample count does not fit in memory.
    InvalidDims {
        /// Cells along X.
        x: u32,
        /// Cells along Y.
        y: u32,
        /// Cells along Z.
        z: u32,
    },
}

impl fmt::Display for CarveCoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarveCoreError::SampleOutOfBounds { coord, max } => write!(
                f,
                "sample ({}, {}, {}) outside grid bounds ({}, {}, {})",
                coord.0, coord.1, coord.2, max.0, max.1, max.2
            ),
            CarveCoreError::InvalidDims { x, y, z } => {
                write!(f, "invalid grid dimensions {}x{}x{}", x, y, z)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CarveCoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "std")]
    #[test]
    fn test_error_display() {
        use std::format;

        let err = CarveCoreError::SampleOutOfBounds {
            coord: (4, 0, 0),
            max: (3, 3, 3),
        };
        assert_eq!(
            format!("{}", err),
            "sample (4, 0, 0) outside grid bounds (3, 3, 3)"
        );

        let err = CarveCoreError::InvalidDims { x: 1, y: 2, z: 3 };
        assert_eq!(format!("{}", err), "invalid grid dimensions 1x2x3");
    }

    #[test]
    fn test_error_equality() {
        let a = CarveCoreError::InvalidDims { x: 1, y: 1, z: 1 };
        assert_eq!(a, CarveCoreError::InvalidDims { x: 1, y: 1, z: 1 });
        assert_ne!(a, CarveCoreError::InvalidDims { x: 2, y: 1, z: 1 });
    }
}
