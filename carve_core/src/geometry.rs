//! Triangle and box geometry used by distance sampling.

use crate::types::Point3;

/// Determinant threshold, relative to `|e1| * |e2| * |dir|`, below which a ray
/// is treated as parallel to a triangle.
const PARALLEL_EPSILON: f32 = 1e-7;

/// Barycentric slack so that a ray through a shared edge reports both
/// triangles despite rounding.
const BARYCENTRIC_SLACK: f32 = 1e-6;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb {
    /// An inverted box that any `expand` call will overwrite.
    #[inline]
    pub fn empty() -> Self {
        Self {
            min: Point3::splat(f32::MAX),
            max: Point3::splat(f32::MIN),
        }
    }

    /// Box from explicit corners.
    #[inline]
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Tight box around a triangle.
    #[inline]
    pub fn from_triangle(a: Point3, b: Point3, c: Point3) -> Self {
        Self {
            min: a.min(b).min(c),
            max: a.max(b).max(c),
        }
    }

    /// Tight box around a set of points; `empty()` when there are none.
    pub fn from_points<'a, I: IntoIterator<Item = &'a Point3>>(points: I) -> Self {
        let mut aabb = Self::empty();
        for p in points {
            aabb.expand(*p);
        }
        aabb
    }

    /// Grow to include `p`.
    #[inline]
    pub fn expand(&mut self, p: Point3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Smallest box containing both.
    #[inline]
    pub fn union(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// `max - min`.
    #[inline]
    pub fn extent(&self) -> Point3 {
        self.max - self.min
    }

    /// Midpoint of the box.
    #[inline]
    pub fn center(&self) -> Point3 {
        (self.min + self.max) * 0.5
    }

    /// Longest axis (0 = x, 1 = y, 2 = z).
    #[inline]
    pub fn longest_axis(&self) -> usize {
        let e = self.extent();
        if e.x >= e.y && e.x >= e.z {
            0
        } else if e.y >= e.z {
            1
        } else {
            2
        }
    }

    /// True when `min <= max` on every axis.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    /// True when the box has positive size on every axis.
    #[inline]
    pub fn has_volume(&self) -> bool {
        let e = self.extent();
        e.x > 0.0 && e.y > 0.0 && e.z > 0.0
    }

    /// Squared distance from `p` to the box; zero inside.
    #[inline]
    pub fn distance_squared(&self, p: Point3) -> f32 {
        let dx = libm::fmaxf(self.min.x - p.x, libm::fmaxf(0.0, p.x - self.max.x));
        let dy = libm::fmaxf(self.min.y - p.y, libm::fmaxf(0.0, p.y - self.max.y));
        let dz = libm::fmaxf(self.min.z - p.z, libm::fmaxf(0.0, p.z - self.max.z));
        dx * dx + dy * dy + dz * dz
    }

    /// Slab test: does the ray `origin + t * dir`, `t >= 0`, touch the box?
    ///
    /// `inv_dir` is the component-wise reciprocal of the direction; infinite
    /// components are fine.
    pub fn intersects_ray(&self, origin: Point3, inv_dir: Point3) -> bool {
        let mut t_min = 0.0f32;
        let mut t_max = f32::INFINITY;
        for axis in 0..3 {
            let o = origin.axis(axis);
            let inv = inv_dir.axis(axis);
            let lo = self.min.axis(axis);
            let hi = self.max.axis(axis);
            if inv.is_infinite() {
                // Parallel to this slab: must already be inside it.
                if o < lo || o > hi {
                    return false;
                }
                continue;
            }
            let t0 = (lo - o) * inv;
            let t1 = (hi - o) * inv;
            let (near, far) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
            t_min = libm::fmaxf(t_min, near);
            t_max = libm::fminf(t_max, far);
            if t_min > t_max {
                return false;
            }
        }
        true
    }
}

/// Closest point to `p` on triangle `abc`.
///
/// Handles all seven Voronoi regions (three vertices, three edges, the face),
/// following the region tests from Ericson's *Real-Time Collision Detection*.
pub fn closest_point_on_triangle(p: Point3, a: Point3, b: Point3, c: Point3) -> Point3 {
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;

    let d1 = ab.dot(ap);
    let d2 = ac.dot(ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return a;
    }

    let bp = p - b;
    let d3 = ab.dot(bp);
    let d4 = ac.dot(bp);
    if d3 >= 0.0 && d4 <= d3 {
        return b;
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        return a + ab * (d1 / (d1 - d3));
    }

    let cp = p - c;
    let d5 = ab.dot(cp);
    let d6 = ac.dot(cp);
    if d6 >= 0.0 && d5 <= d6 {
        return c;
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        return a + ac * (d2 / (d2 - d6));
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return b + (c - b) * w;
    }

    let denom = va + vb + vc;
    if denom == 0.0 {
        // Degenerate (zero-area) triangle whose vertices did not catch it.
        return a;
    }
    let v = vb / denom;
    let w = vc / denom;
    a + ab * v + ac * w
}

/// Euclidean distance from `p` to triangle `abc`. Always `>= 0`.
#[inline]
pub fn point_triangle_distance(p: Point3, a: Point3, b: Point3, c: Point3) -> f32 {
    p.distance(closest_point_on_triangle(p, a, b, c))
}

/// Ray/triangle intersection (Möller–Trumbore).
///
/// Returns the ray parameter `t > 0` of the hit, or `None`. Hits exactly on
/// an edge or vertex count as hits, so a ray through a shared edge reports
/// both triangles.
pub fn ray_triangle_intersection(
    origin: Point3,
    dir: Point3,
    a: Point3,
    b: Point3,
    c: Point3,
) -> Option<f32> {
    let e1 = b - a;
    let e2 = c - a;
    let pvec = dir.cross(e2);
    let det = e1.dot(pvec);
    let scale = e1.length() * e2.length() * dir.length();
    if libm::fabsf(det) <= PARALLEL_EPSILON * scale {
        return None;
    }
    let inv_det = 1.0 / det;

    let tvec = origin - a;
    let u = tvec.dot(pvec) * inv_det;
    if !(-BARYCENTRIC_SLACK..=1.0 + BARYCENTRIC_SLACK).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(e1);
    let v = dir.dot(qvec) * inv_det;
    if v < -BARYCENTRIC_SLACK || u + v > 1.0 + BARYCENTRIC_SLACK {
        return None;
    }

    let t = e2.dot(qvec) * inv_det;
    if t > 0.0 {
        Some(t)
    } else {
        None
    }
}

/// Unit normal of `abc` following right-hand winding; zero when degenerate.
#[inline]
pub fn face_normal(a: Point3, b: Point3, c: Point3) -> Point3 {
    (b - a).cross(c - a).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri() -> (Point3, Point3, Point3) {
        (
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn test_closest_point_face_region() {
        let (a, b, c) = tri();
        let p = Point3::new(0.25, 0.25, 1.0);
        let cp = closest_point_on_triangle(p, a, b, c);
        assert!((cp - Point3::new(0.25, 0.25, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_closest_point_vertex_region() {
        let (a, b, c) = tri();
        let cp = closest_point_on_triangle(Point3::new(-1.0, -1.0, 0.5), a, b, c);
        assert_eq!(cp, a);
        let cp = closest_point_on_triangle(Point3::new(2.0, -0.5, 0.0), a, b, c);
        assert_eq!(cp, b);
    }

    #[test]
    fn test_closest_point_edge_region() {
        let (a, b, c) = tri();
        // Beyond the hypotenuse
        let cp = closest_point_on_triangle(Point3::new(1.0, 1.0, 0.0), a, b, c);
        assert!((cp - Point3::new(0.5, 0.5, 0.0)).length() < 1e-6);
        // Below edge ab
        let cp = closest_point_on_triangle(Point3::new(0.5, -2.0, 0.0), a, b, c);
        assert!((cp - Point3::new(0.5, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_distance_on_face_is_zero() {
        let (a, b, c) = tri();
        let d = point_triangle_distance(Point3::new(0.2, 0.3, 0.0), a, b, c);
        assert!(d.abs() < 1e-7);
    }

    #[test]
    fn test_degenerate_triangle_distance() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(2.0, 0.0, 0.0);
        let d = point_triangle_distance(Point3::new(0.5, 1.0, 0.0), a, b, c);
        assert!(d.is_finite());
        assert!((d - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_hits_triangle() {
        let (a, b, c) = tri();
        let t = ray_triangle_intersection(
            Point3::new(0.2, 0.2, -1.0),
            Point3::new(0.0, 0.0, 1.0),
            a,
            b,
            c,
        );
        assert!((t.unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_ray_misses_behind_and_outside() {
        let (a, b, c) = tri();
        let dir = Point3::new(0.0, 0.0, 1.0);
        // Triangle is behind the origin
        assert!(ray_triangle_intersection(Point3::new(0.2, 0.2, 1.0), dir, a, b, c).is_none());
        // Passes beside the triangle
        assert!(ray_triangle_intersection(Point3::new(0.8, 0.8, -1.0), dir, a, b, c).is_none());
        // Parallel to the triangle plane
        assert!(ray_triangle_intersection(
            Point3::new(0.2, 0.2, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            a,
            b,
            c
        )
        .is_none());
    }

    #[test]
    fn test_ray_hits_tiny_triangle() {
        // The parallel test scales with the triangle, not with absolute size.
        for s in [1.0f32, 1e-3, 3e-5, 1e-7] {
            let a = Point3::ZERO;
            let b = Point3::new(s, 0.0, 0.0);
            let c = Point3::new(0.0, s, 0.0);
            let origin = Point3::new(0.25 * s, 0.25 * s, -s);
            let t = ray_triangle_intersection(origin, Point3::new(0.0, 0.0, 1.0), a, b, c);
            assert!((t.unwrap() - s).abs() <= s * 1e-5, "scale {}", s);
        }
    }

    #[test]
    fn test_ray_through_shared_edge_hits_both() {
        let a = Point3::ZERO;
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(1.0, 1.0, 0.0);
        let d = Point3::new(0.0, 1.0, 0.0);
        let origin = Point3::new(0.3, 0.3, -1.0);
        let dir = Point3::new(0.0, 0.0, 1.0);
        assert!(ray_triangle_intersection(origin, dir, a, b, c).is_some());
        assert!(ray_triangle_intersection(origin, dir, a, c, d).is_some());
    }

    #[test]
    fn test_face_normal_winding() {
        let (a, b, c) = tri();
        assert_eq!(face_normal(a, b, c), Point3::new(0.0, 0.0, 1.0));
        assert_eq!(face_normal(c, b, a), Point3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_aabb_distance_and_ray() {
        let aabb = Aabb::new(Point3::ZERO, Point3::splat(1.0));
        assert_eq!(aabb.distance_squared(Point3::splat(0.5)), 0.0);
        assert!((aabb.distance_squared(Point3::new(2.0, 0.5, 0.5)) - 1.0).abs() < 1e-6);

        let inv = |d: Point3| Point3::new(1.0 / d.x, 1.0 / d.y, 1.0 / d.z);
        let toward = Point3::new(1.0, 0.0, 0.0);
        assert!(aabb.intersects_ray(Point3::new(-1.0, 0.5, 0.5), inv(toward)));
        assert!(!aabb.intersects_ray(Point3::new(-1.0, 2.0, 0.5), inv(toward)));
        assert!(!aabb.intersects_ray(Point3::new(2.0, 0.5, 0.5), inv(toward)));
    }

    #[test]
    fn test_aabb_from_points() {
        let pts = [Point3::new(1.0, -2.0, 0.0), Point3::new(-1.0, 3.0, 2.0)];
        let aabb = Aabb::from_points(&pts);
        assert_eq!(aabb.min, Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Point3::new(1.0, 3.0, 2.0));
        assert!(aabb.has_volume());
        assert!(!Aabb::from_points(&[]).is_valid());
    }
}
