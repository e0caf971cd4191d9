//! Navigation rebuild notifications.

use carve_core::Aabb;

/// Result of asking the navigation system to rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavStatus {
    /// The affected region was rebuilt.
    Rebuilt,
    /// No navigation system is present; nothing happened.
    Unavailable,
}

/// Receiver for mesh change notifications.
///
/// Called after every extraction that replaced the body's mesh, with the
/// world-space bounds of the new mesh ([`Aabb::empty`] when it is empty).
pub trait NavigationSink: Send {
    /// React to a mesh change.
    fn mesh_changed(&mut self, bounds: Aabb) -> NavStatus;
}

/// Sink that reports [`NavStatus::Unavailable`] for every change.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNavigation;

impl NavigationSink for NoNavigation {
    fn mesh_changed(&mut self, _bounds: Aabb) -> NavStatus {
        NavStatus::Unavailable
    }
}

impl<F> NavigationSink for F
where
    F: FnMut(Aabb) -> NavStatus + Send,
{
    fn mesh_changed(&mut self, bounds: Aabb) -> NavStatus {
        self(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carve_core::Point3;

    #[test]
    fn test_no_navigation() {
        let mut sink = NoNavigation;
        assert_eq!(sink.mesh_changed(Aabb::empty()), NavStatus::Unavailable);
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = 0;
        {
            let mut sink = |b: Aabb| {
                seen += 1;
                assert!(b.is_valid());
                NavStatus::Rebuilt
            };
            let bounds = Aabb::new(Point3::ZERO, Point3::splat(1.0));
            assert_eq!(sink.mesh_changed(bounds), NavStatus::Rebuilt);
        }
        assert_eq!(seen, 1);
    }
}
