//! Immutable source mesh handed over by the mesh provider.

use carve_core::{Aabb, Point3};

use crate::error::{CarveIoError, Result};

/// Triangle mesh that a voxel grid is sampled from.
///
/// Buffers are validated once in [`ReferenceMesh::new`] and never change
/// afterwards. Winding only needs to be consistent across shared edges: the
/// sampler uses face orientation to tell a crossing from a graze.
#[derive(Debug, Clone)]
pub struct ReferenceMesh {
    positions: Vec<Point3>,
    triangles: Vec<[u32; 3]>,
    normals: Option<Vec<Point3>>,
    uvs: Option<Vec<[f32; 2]>>,
    bounds: Aabb,
}

impl ReferenceMesh {
    /// Build from vertex positions and a flat triangle index list.
    ///
    /// # Errors
    /// `InvalidMesh` when there are no triangles, the index list length is
    /// not a multiple of 3, an index is out of range, or a position is not
    /// finite.
    pub fn new(positions: Vec<Point3>, indices: &[u32]) -> Result<Self> {
        if positions.is_empty() {
            return Err(CarveIoError::invalid_mesh("mesh has no vertices"));
        }
        if indices.is_empty() {
            return Err(CarveIoError::invalid_mesh("mesh has no triangles"));
        }
        if indices.len() % 3 != 0 {
            return Err(CarveIoError::invalid_mesh(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        if let Some(i) = positions.iter().position(|p| !p.is_finite()) {
            return Err(CarveIoError::invalid_mesh(format!(
                "vertex {} has a non-finite position",
                i
            )));
        }
        let vertex_count = positions.len();
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(CarveIoError::invalid_mesh(format!(
                "index {} out of range for {} vertices",
                bad, vertex_count
            )));
        }

        let triangles = indices
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
            .collect();
        let bounds = Aabb::from_points(&positions);

        Ok(Self {
            positions,
            triangles,
            normals: None,
            uvs: None,
            bounds,
        })
    }

    /// Attach per-vertex normals.
    pub fn with_normals(mut self, normals: Vec<Point3>) -> Result<Self> {
        if normals.len() != self.positions.len() {
            return Err(CarveIoError::invalid_mesh(format!(
                "{} normals for {} vertices",
                normals.len(),
                self.positions.len()
            )));
        }
        self.normals = Some(normals);
        Ok(self)
    }

    /// Attach per-vertex texture coordinates.
    pub fn with_uvs(mut self, uvs: Vec<[f32; 2]>) -> Result<Self> {
        if uvs.len() != self.positions.len() {
            return Err(CarveIoError::invalid_mesh(format!(
                "{} UVs for {} vertices",
                uvs.len(),
                self.positions.len()
            )));
        }
        self.uvs = Some(uvs);
        Ok(self)
    }

    /// Vertex positions.
    #[inline]
    pub fn positions(&self) -> &[Point3] {
        &self.positions
    }

    /// Triangle index triples.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Per-vertex normals, if the provider supplied them.
    #[inline]
    pub fn normals(&self) -> Option<&[Point3]> {
        self.normals.as_deref()
    }

    /// Per-vertex UVs, if the provider supplied them.
    #[inline]
    pub fn uvs(&self) -> Option<&[[f32; 2]]> {
        self.uvs.as_deref()
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Corner positions of triangle `index`.
    #[inline]
    pub fn triangle(&self, index: usize) -> [Point3; 3] {
        let [a, b, c] = self.triangles[index];
        [
            self.positions[a as usize],
            self.positions[b as usize],
            self.positions[c as usize],
        ]
    }

    /// Axis-aligned bounds in mesh-local space.
    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> (Vec<Point3>, Vec<u32>) {
        (
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(2.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 3.0),
            ],
            vec![0, 1, 2, 0, 2, 3],
        )
    }

    #[test]
    fn test_new_mesh() {
        let (p, i) = quad();
        let mesh = ReferenceMesh::new(p, &i).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.triangles()[1], [0, 2, 3]);
        assert_eq!(mesh.bounds().min, Point3::ZERO);
        assert_eq!(mesh.bounds().max, Point3::new(2.0, 1.0, 3.0));
        assert_eq!(mesh.triangle(0)[1], Point3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_rejects_bad_indices() {
        let (p, _) = quad();
        assert!(ReferenceMesh::new(p.clone(), &[0, 1]).is_err());
        assert!(ReferenceMesh::new(p.clone(), &[0, 1, 4]).is_err());
        assert!(ReferenceMesh::new(p, &[]).is_err());
        assert!(ReferenceMesh::new(Vec::new(), &[0, 0, 0]).is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        let (mut p, i) = quad();
        p[2].y = f32::INFINITY;
        assert!(matches!(
            ReferenceMesh::new(p, &i),
            Err(CarveIoError::InvalidMesh { .. })
        ));
    }

    #[test]
    fn test_attribute_lengths() {
        let (p, i) = quad();
        let mesh = ReferenceMesh::new(p, &i).unwrap();
        assert!(mesh.clone().with_uvs(vec![[0.0, 0.0]; 3]).is_err());
        let mesh = mesh
            .with_uvs(vec![[0.0, 0.0]; 4])
            .unwrap()
            .with_normals(vec![Point3::new(0.0, 0.0, 1.0); 4])
            .unwrap();
        assert_eq!(mesh.uvs().map(<[_]>::len), Some(4));
        assert!(mesh.normals().is_some());
    }
}
