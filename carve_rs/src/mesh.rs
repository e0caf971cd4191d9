//! Extracted mesh buffers, statistics and OBJ export.

use std::fmt::Write as _;
use std::io::Write;

use carve_core::{Aabb, Point3};

/// Render-ready triangle mesh produced by one extraction pass.
///
/// Vertices are not shared: every triangle owns three consecutive vertices,
/// so `normals`, `uvs` and `colors` are per-vertex buffers of the same length
/// as `positions`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedMesh {
    /// Vertex positions in world units.
    pub positions: Vec<Point3>,
    /// Flat triangle index list, a multiple of 3.
    pub indices: Vec<u32>,
    /// Flat face normal repeated on each vertex of its triangle.
    pub normals: Vec<Point3>,
    /// Texture coordinates.
    pub uvs: Vec<[f32; 2]>,
    /// RGBA vertex colours.
    pub colors: Vec<[u8; 4]>,
}

impl ExtractedMesh {
    /// Empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// True when no triangles were emitted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Drop all geometry, keeping allocations.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.indices.clear();
        self.normals.clear();
        self.uvs.clear();
        self.colors.clear();
    }

    /// Bounding box of all vertices; [`Aabb::empty`] for an empty mesh.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(&self.positions)
    }

    /// Corner positions of triangle `index` in index-buffer order.
    pub fn triangle(&self, index: usize) -> [Point3; 3] {
        let i = &self.indices[index * 3..index * 3 + 3];
        [
            self.positions[i[0] as usize],
            self.positions[i[1] as usize],
            self.positions[i[2] as usize],
        ]
    }
}

/// Mesh statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshStats {
    /// Number of triangles.
    pub triangle_count: usize,
    /// Number of vertices.
    pub vertex_count: usize,
    /// Total surface area.
    pub surface_area: f32,
    /// Bounding box minimum.
    pub bbox_min: Point3,
    /// Bounding box maximum.
    pub bbox_max: Point3,
}

impl MeshStats {
    /// Compute statistics for a mesh.
    pub fn from_mesh(mesh: &ExtractedMesh) -> Self {
        let surface_area = (0..mesh.triangle_count())
            .map(|i| {
                let [a, b, c] = mesh.triangle(i);
                (b - a).cross(c - a).length() * 0.5
            })
            .sum();

        let (bbox_min, bbox_max) = if mesh.is_empty() {
            (Point3::ZERO, Point3::ZERO)
        } else {
            let bounds = mesh.bounds();
            (bounds.min, bounds.max)
        };

        Self {
            triangle_count: mesh.triangle_count(),
            vertex_count: mesh.vertex_count(),
            surface_area,
            bbox_min,
            bbox_max,
        }
    }
}

/// Render a mesh as Wavefront OBJ text with normals and texture coordinates.
pub fn mesh_to_obj(mesh: &ExtractedMesh) -> String {
    let mut obj = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(obj, "# carve_rs extracted mesh");
    let _ = writeln!(
        obj,
        "# {} triangles, {} vertices",
        mesh.triangle_count(),
        mesh.vertex_count()
    );
    let _ = writeln!(obj);

    for p in &mesh.positions {
        let _ = writeln!(obj, "v {} {} {}", p.x, p.y, p.z);
    }
    for uv in &mesh.uvs {
        let _ = writeln!(obj, "vt {} {}", uv[0], uv[1]);
    }
    for n in &mesh.normals {
        let _ = writeln!(obj, "vn {} {} {}", n.x, n.y, n.z);
    }
    let _ = writeln!(obj);

    for tri in mesh.indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
        let _ = writeln!(obj, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}");
    }

    obj
}

/// Write [`mesh_to_obj`] output to `writer`.
pub fn write_obj<W: Write>(mesh: &ExtractedMesh, writer: &mut W) -> std::io::Result<()> {
    writer.write_all(mesh_to_obj(mesh).as_bytes())
}
