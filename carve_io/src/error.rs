//! Error types for carve_io operations.

use carve_core::CarveCoreError;
use thiserror::Error;

/// Errors that can occur while building, editing or persisting voxel data.
#[derive(Error, Debug)]
pub enum CarveIoError {
    /// Reference mesh buffers are inconsistent.
    #[error("invalid mesh: {message}")]
    InvalidMesh {
        /// Description of the problem.
        message: String,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem.
        message: String,
    },

    /// Requested grid would exceed the sample limit.
    #[error("grid of {samples} samples exceeds the limit of {limit}")]
    GridTooLarge {
        /// Requested sample count.
        samples: u64,
        /// Maximum allowed sample count.
        limit: usize,
    },

    /// Serialized voxel data failed validation.
    #[error("corrupt voxel data: {message}")]
    CorruptData {
        /// Description of the problem.
        message: String,
    },

    /// Underlying reader or writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed OBJ input.
    #[error("OBJ parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// Error from the geometry layer.
    #[error(transparent)]
    Core(#[from] CarveCoreError),
}

impl CarveIoError {
    pub(crate) fn invalid_mesh(message: impl Into<String>) -> Self {
        CarveIoError::InvalidMesh {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        CarveIoError::InvalidConfig {
            message: message.into(),
        }
    }

    pub(crate) fn corrupt(message: impl Into<String>) -> Self {
        CarveIoError::CorruptData {
            message: message.into(),
        }
    }
}

/// Result type alias for carve_io operations.
pub type Result<T> = std::result::Result<T, CarveIoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CarveIoError::GridTooLarge {
            samples: 20_000_000,
            limit: 10_000_000,
        };
        assert_eq!(
            format!("{}", err),
            "grid of 20000000 samples exceeds the limit of 10000000"
        );

        let err = CarveIoError::Parse {
            line: 7,
            message: "bad vertex".into(),
        };
        assert!(format!("{}", err).contains("line 7"));
    }

    #[test]
    fn test_from_core_error() {
        let err: CarveIoError = CarveCoreError::InvalidDims { x: 1, y: 2, z: 3 }.into();
        assert_eq!(format!("{}", err), "invalid grid dimensions 1x2x3");
    }
}
