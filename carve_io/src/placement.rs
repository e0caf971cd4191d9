//! Mesh-local to world transform.

use carve_core::{Aabb, Point3};

use crate::error::{CarveIoError, Result};

/// Uniform scale followed by a translation: `world = local * scale + translation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// World position of the mesh-local origin.
    pub translation: Point3,
    /// Uniform scale from mesh-local to world units.
    pub scale: f32,
}

impl Placement {
    /// No translation, unit scale.
    pub const IDENTITY: Self = Self {
        translation: Point3::ZERO,
        scale: 1.0,
    };

    /// Create a placement.
    #[inline]
    pub const fn new(translation: Point3, scale: f32) -> Self {
        Self { translation, scale }
    }

    /// Mesh-local point to world space.
    #[inline]
    pub fn to_world(&self, local: Point3) -> Point3 {
        local * self.scale + self.translation
    }

    /// World point to mesh-local space.
    #[inline]
    pub fn to_local(&self, world: Point3) -> Point3 {
        (world - self.translation) / self.scale
    }

    /// World-space box of a mesh-local box.
    #[inline]
    pub fn transform_bounds(&self, local: Aabb) -> Aabb {
        Aabb::new(self.to_world(local.min), self.to_world(local.max))
    }

    /// Scale must be finite and positive, translation finite.
    pub fn validate(&self) -> Result<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(CarveIoError::invalid_config(format!(
                "placement scale must be finite and > 0, got {}",
                self.scale
            )));
        }
        if !self.translation.is_finite() {
            return Err(CarveIoError::invalid_config(
                "placement translation must be finite",
            ));
        }
        Ok(())
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let placement = Placement::new(Point3::new(10.0, -2.0, 3.0), 2.5);
        let local = Point3::new(0.4, 1.0, -7.0);
        let world = placement.to_world(local);
        assert_eq!(world, Point3::new(11.0, 0.5, -14.5));
        assert!((placement.to_local(world) - local).length() < 1e-5);
    }

    #[test]
    fn test_transform_bounds() {
        let placement = Placement::new(Point3::splat(1.0), 2.0);
        let b = placement.transform_bounds(Aabb::new(Point3::ZERO, Point3::splat(1.0)));
        assert_eq!(b.min, Point3::splat(1.0));
        assert_eq!(b.max, Point3::splat(3.0));
    }

    #[test]
    fn test_validate() {
        assert!(Placement::IDENTITY.validate().is_ok());
        assert!(Placement::new(Point3::ZERO, 0.0).validate().is_err());
        assert!(Placement::new(Point3::ZERO, -1.0).validate().is_err());
        assert!(Placement::new(Point3::splat(f32::NAN), 1.0).validate().is_err());
    }
}
