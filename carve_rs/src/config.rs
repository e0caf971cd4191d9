//! Body configuration.

use carve_io::{SamplerConfig, DEFAULT_CARVE_DEPTH};

use crate::error::{CarveError, Result};
use crate::extract::ExtractConfig;

/// Everything a [`VoxelBody`](crate::VoxelBody) needs besides its mesh and
/// placement.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyConfig {
    /// Grid spacing in world units.
    pub cell_size: f32,
    /// Whole cells added on every side of the mesh bounds.
    pub padding_cells: u32,
    /// Carved samples are pushed to at most `-carve_depth * cell_size`.
    pub carve_depth: f32,
    /// Distance sampler settings.
    pub sampler: SamplerConfig,
    /// Extraction settings.
    pub extract: ExtractConfig,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            padding_cells: 1,
            carve_depth: DEFAULT_CARVE_DEPTH,
            sampler: SamplerConfig::default(),
            extract: ExtractConfig::default(),
        }
    }
}

impl BodyConfig {
    /// Default configuration with the given cell size.
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            ..Self::default()
        }
    }

    /// Set the padding.
    pub fn with_padding(mut self, padding_cells: u32) -> Self {
        self.padding_cells = padding_cells;
        self
    }

    /// Set the carve depth.
    pub fn with_carve_depth(mut self, carve_depth: f32) -> Self {
        self.carve_depth = carve_depth;
        self
    }

    /// Replace the sampler settings.
    pub fn with_sampler(mut self, sampler: SamplerConfig) -> Self {
        self.sampler = sampler;
        self
    }

    /// Replace the extraction settings.
    pub fn with_extract(mut self, extract: ExtractConfig) -> Self {
        self.extract = extract;
        self
    }

    /// Check every field, including the nested configs.
    pub fn validate(&self) -> Result<()> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(CarveError::config(format!(
                "cell size must be finite and > 0, got {}",
                self.cell_size
            )));
        }
        if !self.carve_depth.is_finite() || self.carve_depth <= 0.0 {
            return Err(CarveError::config(format!(
                "carve depth must be finite and > 0, got {}",
                self.carve_depth
            )));
        }
        self.sampler
            .validate()
            .map_err(|e| CarveError::config(e.to_string()))?;
        self.extract.validate()
    }
}
