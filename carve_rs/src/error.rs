//! Error types for carve_rs operations.

use carve_io::CarveIoError;
use thiserror::Error;

/// Errors that can occur while setting up or driving a voxel body.
#[derive(Error, Debug)]
pub enum CarveError {
    /// Invalid configuration, rejected before any allocation.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Storage, sampling or persistence failure.
    #[error(transparent)]
    Io(#[from] CarveIoError),
}

impl CarveError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        CarveError::Config {
            message: message.into(),
        }
    }
}

/// Result type alias for carve_rs operations.
pub type Result<T> = std::result::Result<T, CarveError>;
