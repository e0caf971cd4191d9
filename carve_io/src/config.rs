//! Sampler configuration.

use carve_core::Point3;

use crate::error::{CarveIoError, Result};

/// Minimum number of ray directions the inside vote accepts.
pub const MIN_RAY_DIRECTIONS: usize = 6;

/// Parameters of the distance field sampler (immutable after construction).
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerConfig {
    /// Unit directions cast by the inside/outside vote.
    pub ray_directions: Vec<Point3>,
    /// Distance each ray origin is pushed along its own direction, in mesh units.
    pub epsilon: f32,
    /// Maximum triangles per BVH leaf.
    pub leaf_size: usize,
    /// Use the BVH; `false` tests every triangle.
    pub use_bvh: bool,
}

impl SamplerConfig {
    /// Six axis directions plus four body diagonals.
    pub fn default_directions() -> Vec<Point3> {
        let diagonals = [
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(-1.0, 1.0, 1.0),
            Point3::new(1.0, -1.0, 1.0),
            Point3::new(1.0, 1.0, -1.0),
        ];
        let mut dirs = vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, -1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, -1.0),
        ];
        dirs.extend(diagonals.iter().map(|d| d.normalize()));
        dirs
    }

    /// Replace the ray directions. Directions are normalized.
    pub fn with_ray_directions(mut self, dirs: impl IntoIterator<Item = Point3>) -> Self {
        self.ray_directions = dirs.into_iter().map(Point3::normalize).collect();
        self
    }

    /// Set the ray origin offset.
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the BVH leaf size.
    pub fn with_leaf_size(mut self, leaf_size: usize) -> Self {
        self.leaf_size = leaf_size;
        self
    }

    /// Toggle the BVH.
    pub fn with_bvh(mut self, use_bvh: bool) -> Self {
        self.use_bvh = use_bvh;
        self
    }

    /// Check every field is in range.
    pub fn validate(&self) -> Result<()> {
        let usable = self
            .ray_directions
            .iter()
            .filter(|d| d.is_finite() && d.length_squared() > 0.0)
            .count();
        if usable != self.ray_directions.len() {
            return Err(CarveIoError::invalid_config(
                "ray directions must be finite and non-zero",
            ));
        }
        if usable < MIN_RAY_DIRECTIONS {
            return Err(CarveIoError::invalid_config(format!(
                "need at least {} ray directions, got {}",
                MIN_RAY_DIRECTIONS, usable
            )));
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(CarveIoError::invalid_config(format!(
                "epsilon must be finite and >= 0, got {}",
                self.epsilon
            )));
        }
        if self.leaf_size == 0 {
            return Err(CarveIoError::invalid_config("leaf size must be at least 1"));
        }
        Ok(())
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            ray_directions: Self::default_directions(),
            epsilon: 1e-4,
            leaf_size: 8,
            use_bvh: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SamplerConfig::default();
        assert_eq!(config.ray_directions.len(), 10);
        for d in &config.ray_directions {
            assert!((d.length() - 1.0).abs() < 1e-6);
        }
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_too_few_directions() {
        let config = SamplerConfig::default()
            .with_ray_directions(SamplerConfig::default_directions().into_iter().take(5));
        assert!(matches!(
            config.validate(),
            Err(CarveIoError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_direction() {
        let mut config = SamplerConfig::default();
        config.ray_directions.push(Point3::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_epsilon_and_leaf() {
        assert!(SamplerConfig::default().with_epsilon(-1.0).validate().is_err());
        assert!(SamplerConfig::default()
            .with_epsilon(f32::NAN)
            .validate()
            .is_err());
        assert!(SamplerConfig::default().with_leaf_size(0).validate().is_err());
    }
}
