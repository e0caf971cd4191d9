//! Bounding Volume Hierarchy over a reference mesh.
//!
//! Binary tree split at the centroid median of the longest axis. Serves two
//! queries: nearest triangle (closest distance) and all ray crossings
//! (inside/outside parity).

use carve_core::{closest_point_on_triangle, face_normal, ray_triangle_intersection, Aabb, Point3};

use crate::mesh::ReferenceMesh;

/// One ray/triangle crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Ray parameter of the hit.
    pub t: f32,
    /// Sign of `dir · normal`: `1` exits through the front face, `-1`
    /// enters through it.
    pub facing: i8,
}

impl RayHit {
    /// Intersect the ray with triangle `tri`.
    #[inline]
    pub fn test(origin: Point3, dir: Point3, tri: [Point3; 3]) -> Option<Self> {
        let [a, b, c] = tri;
        let t = ray_triangle_intersection(origin, dir, a, b, c)?;
        let d = dir.dot(face_normal(a, b, c));
        let facing = if d > 0.0 {
            1
        } else if d < 0.0 {
            -1
        } else {
            0
        };
        Some(Self { t, facing })
    }
}

/// BVH node.
enum BvhNode {
    /// Leaf node containing triangle indices.
    Leaf {
        bounds: Aabb,
        triangle_indices: Vec<usize>,
    },
    /// Internal node with two children.
    Internal {
        bounds: Aabb,
        left: Box<BvhNode>,
        right: Box<BvhNode>,
    },
}

impl BvhNode {
    fn bounds(&self) -> &Aabb {
        match self {
            BvhNode::Leaf { bounds, .. } => bounds,
            BvhNode::Internal { bounds, .. } => bounds,
        }
    }
}

/// Triangle BVH for O(log n) distance and ray queries.
///
/// Stores only the hierarchy; the mesh it was built from must be passed to
/// every query.
pub struct TriangleBvh {
    root: Option<BvhNode>,
    triangle_count: usize,
}

impl TriangleBvh {
    /// Build a BVH over every triangle of `mesh`.
    ///
    /// `max_leaf_size` is clamped to at least 1. Build time is O(n log² n).
    pub fn build(mesh: &ReferenceMesh, max_leaf_size: usize) -> Self {
        let triangle_count = mesh.triangle_count();
        if triangle_count == 0 {
            return Self {
                root: None,
                triangle_count,
            };
        }

        let triangle_bounds: Vec<Aabb> = (0..triangle_count)
            .map(|i| {
                let [a, b, c] = mesh.triangle(i);
                Aabb::from_triangle(a, b, c)
            })
            .collect();
        let indices: Vec<usize> = (0..triangle_count).collect();
        let root = Self::build_recursive(&triangle_bounds, indices, max_leaf_size.max(1));

        Self {
            root: Some(root),
            triangle_count,
        }
    }

    fn build_recursive(
        triangle_bounds: &[Aabb],
        mut indices: Vec<usize>,
        max_leaf_size: usize,
    ) -> BvhNode {
        let bounds = indices
            .iter()
            .fold(Aabb::empty(), |acc, &i| acc.union(&triangle_bounds[i]));

        if indices.len() <= max_leaf_size {
            return BvhNode::Leaf {
                bounds,
                triangle_indices: indices,
            };
        }

        let axis = bounds.longest_axis();
        indices.sort_by(|&a, &b| {
            let va = triangle_bounds[a].center().axis(axis);
            let vb = triangle_bounds[b].center().axis(axis);
            va.partial_cmp(&vb).unwrap_or(core::cmp::Ordering::Equal)
        });

        let mid = indices.len() / 2;
        let right_indices = indices.split_off(mid);
        let left = Self::build_recursive(triangle_bounds, indices, max_leaf_size);
        let right = Self::build_recursive(triangle_bounds, right_indices, max_leaf_size);

        BvhNode::Internal {
            bounds,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Nearest triangle to `query`.
    ///
    /// Returns `(triangle_index, squared_distance)`, or `None` for an empty BVH.
    pub fn nearest_triangle(&self, mesh: &ReferenceMesh, query: Point3) -> Option<(usize, f32)> {
        let root = self.root.as_ref()?;
        let mut best_dist_sq = f32::MAX;
        let mut best = None;
        Self::nearest_recursive(root, mesh, query, &mut best_dist_sq, &mut best);
        best.map(|idx| (idx, best_dist_sq))
    }

    fn nearest_recursive(
        node: &BvhNode,
        mesh: &ReferenceMesh,
        query: Point3,
        best_dist_sq: &mut f32,
        best: &mut Option<usize>,
    ) {
        if node.bounds().distance_squared(query) >= *best_dist_sq {
            return;
        }

        match node {
            BvhNode::Leaf {
                triangle_indices, ..
            } => {
                for &tri_idx in triangle_indices {
                    let [a, b, c] = mesh.triangle(tri_idx);
                    let dist_sq = (query - closest_point_on_triangle(query, a, b, c)).length_squared();
                    if dist_sq < *best_dist_sq {
                        *best_dist_sq = dist_sq;
                        *best = Some(tri_idx);
                    }
                }
            }
            BvhNode::Internal { left, right, .. } => {
                // Visit closer child first
                let left_dist = left.bounds().distance_squared(query);
                let right_dist = right.bounds().distance_squared(query);
                let (first, second) = if left_dist < right_dist {
                    (left, right)
                } else {
                    (right, left)
                };
                Self::nearest_recursive(first, mesh, query, best_dist_sq, best);
                Self::nearest_recursive(second, mesh, query, best_dist_sq, best);
            }
        }
    }

    /// Append every triangle crossed by `origin + t * dir`, `t > 0`, to
    /// `hits`. Order is unspecified.
    pub fn ray_hits(&self, mesh: &ReferenceMesh, origin: Point3, dir: Point3, hits: &mut Vec<RayHit>) {
        let Some(root) = self.root.as_ref() else {
            return;
        };
        let inv_dir = Point3::new(1.0 / dir.x, 1.0 / dir.y, 1.0 / dir.z);
        let mut stack: Vec<&BvhNode> = vec![root];
        while let Some(node) = stack.pop() {
            if !node.bounds().intersects_ray(origin, inv_dir) {
                continue;
            }
            match node {
                BvhNode::Leaf {
                    triangle_indices, ..
                } => {
                    hits.extend(
                        triangle_indices
                            .iter()
                            .filter_map(|&i| RayHit::test(origin, dir, mesh.triangle(i))),
                    );
                }
                BvhNode::Internal { left, right, .. } => {
                    stack.push(left);
                    stack.push(right);
                }
            }
        }
    }

    /// True when built over zero triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of triangles indexed.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.triangle_count
    }

    /// Bounds of the whole hierarchy.
    pub fn bounds(&self) -> Option<Aabb> {
        self.root.as_ref().map(|r| *r.bounds())
    }
}
