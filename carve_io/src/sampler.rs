//! Signed distance sampling against a reference mesh.
//!
//! # Algorithm
//!
//! 1. Unsigned distance: minimum distance to any triangle (BVH-pruned or
//!    brute force), closest-point handling every face/edge/vertex region
//! 2. Sign: crossing-parity vote over several ray directions
//!    - each ray starts `epsilon` along its own direction
//!    - hits at the same parameter (shared edges, shared vertices) merge:
//!      one crossing when every merged face points the same way along the
//!      ray, none when they disagree (the ray only touches the surface)
//!    - a ray with no crossings is retried reversed; if that also misses,
//!      the ray abstains
//!    - inside when strictly more than half of all rays report odd parity

use carve_core::{point_triangle_distance, Point3};

use crate::config::SamplerConfig;
use crate::error::Result;
use crate::mesh::ReferenceMesh;
use crate::spatial::{RayHit, TriangleBvh};

/// Relative tolerance under which two crossings along one ray are merged.
const HIT_MERGE_TOLERANCE: f32 = 1e-5;

/// Outcome of one ray of the inside vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RayVote {
    /// Odd number of crossings.
    Odd,
    /// Even, non-zero number of crossings.
    Even,
    /// No crossings forwards or backwards.
    Abstain,
}

/// Distance field sampler bound to one reference mesh.
pub struct DistanceSampler {
    mesh: ReferenceMesh,
    bvh: Option<TriangleBvh>,
    config: SamplerConfig,
}

impl DistanceSampler {
    /// Validate `config` and index `mesh`.
    pub fn new(mesh: ReferenceMesh, config: SamplerConfig) -> Result<Self> {
        config.validate()?;
        let bvh = config
            .use_bvh
            .then(|| TriangleBvh::build(&mesh, config.leaf_size));
        log::debug!(
            "sampler ready: {} triangles, {} rays, bvh={}",
            mesh.triangle_count(),
            config.ray_directions.len(),
            bvh.is_some()
        );
        Ok(Self { mesh, bvh, config })
    }

    /// The mesh being sampled.
    #[inline]
    pub fn mesh(&self) -> &ReferenceMesh {
        &self.mesh
    }

    /// Active configuration.
    #[inline]
    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Minimum Euclidean distance from `point` to the mesh. Always `>= 0`.
    pub fn closest_distance(&self, point: Point3) -> f32 {
        match &self.bvh {
            Some(bvh) => bvh
                .nearest_triangle(&self.mesh, point)
                .map_or(f32::MAX, |(_, dist_sq)| libm::sqrtf(dist_sq)),
            None => (0..self.mesh.triangle_count())
                .map(|i| {
                    let [a, b, c] = self.mesh.triangle(i);
                    point_triangle_distance(point, a, b, c)
                })
                .fold(f32::MAX, f32::min),
        }
    }

    /// Number of distinct crossings of the ray `point + t * dir`, `t > 0`,
    /// after pushing the origin `epsilon` along `dir`.
    pub fn crossings(&self, point: Point3, dir: Point3) -> usize {
        let mut hits = Vec::new();
        self.crossings_into(point, dir, &mut hits)
    }

    fn crossings_into(&self, point: Point3, dir: Point3, hits: &mut Vec<RayHit>) -> usize {
        hits.clear();
        let origin = point + dir * self.config.epsilon;
        match &self.bvh {
            Some(bvh) => bvh.ray_hits(&self.mesh, origin, dir, hits),
            None => {
                hits.extend(
                    (0..self.mesh.triangle_count())
                        .filter_map(|i| RayHit::test(origin, dir, self.mesh.triangle(i))),
                );
            }
        }
        crossing_count(hits)
    }

    /// Parity vote of a single ray, with the reversed retry.
    pub fn ray_vote(&self, point: Point3, dir: Point3) -> RayVote {
        let mut hits = Vec::new();
        self.ray_vote_with(point, dir, &mut hits)
    }

    fn ray_vote_with(&self, point: Point3, dir: Point3, hits: &mut Vec<RayHit>) -> RayVote {
        let mut count = self.crossings_into(point, dir, hits);
        if count == 0 {
            count = self.crossings_into(point, -dir, hits);
        }
        match count {
            0 => RayVote::Abstain,
            n if n % 2 == 1 => RayVote::Odd,
            _ => RayVote::Even,
        }
    }

    /// Strict-majority parity vote over every configured direction.
    pub fn is_inside(&self, point: Point3) -> bool {
        let mut hits = Vec::with_capacity(16);
        let odd = self
            .config
            .ray_directions
            .iter()
            .filter(|&&dir| self.ray_vote_with(point, dir, &mut hits) == RayVote::Odd)
            .count();
        odd * 2 > self.config.ray_directions.len()
    }

    /// `+distance` inside, `-distance` outside.
    pub fn signed_distance(&self, point: Point3) -> f32 {
        let d = self.closest_distance(point);
        if self.is_inside(point) {
            d
        } else {
            -d
        }
    }
}

/// Sort `hits` by parameter and count surface crossings.
///
/// Hits within tolerance of the first hit of their group form one contact.
/// A contact is a crossing unless it mixes front- and back-facing triangles,
/// which happens where the ray grazes a silhouette edge or vertex. Assumes
/// consistent winding around shared edges.
fn crossing_count(hits: &mut [RayHit]) -> usize {
    hits.sort_unstable_by(|a, b| a.t.partial_cmp(&b.t).unwrap_or(core::cmp::Ordering::Equal));
    let mut count = 0;
    let mut i = 0;
    while i < hits.len() {
        let start = hits[i].t;
        let (mut front, mut back) = (false, false);
        while i < hits.len() && hits[i].t - start <= HIT_MERGE_TOLERANCE * start.max(1.0) {
            front |= hits[i].facing > 0;
            back |= hits[i].facing < 0;
            i += 1;
        }
        if !(front && back) {
            count += 1;
        }
    }
    count
}
