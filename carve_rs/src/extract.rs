//! Full-grid marching cubes extraction.
//!
//! Cells are visited X outer, Y middle, Z inner. The parallel pass gives each
//! X-slab its own buffer and concatenates them in slab order, so both passes
//! produce identical meshes.

use carve_core::marching_cubes::{process_cell, MarchSettings};
use carve_core::{hashed_color, Point3};
use carve_io::VoxelGrid;

use crate::error::{CarveError, Result};
use crate::mesh::ExtractedMesh;

/// Triangle in grid units, table vertex order.
type GridTriangle = [Point3; 3];

/// How vertex colours are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Same colour on every vertex.
    Fixed([u8; 4]),
    /// Opaque colour hashed from `(seed, triangle ordinal)`, shared by the
    /// three vertices of a triangle.
    PerTriangle {
        /// Hash seed.
        seed: u32,
    },
}

impl Default for ColorMode {
    fn default() -> Self {
        ColorMode::PerTriangle { seed: 0 }
    }
}

impl ColorMode {
    /// Colour of triangle number `ordinal`.
    #[inline]
    pub fn color(&self, ordinal: u32) -> [u8; 4] {
        match *self {
            ColorMode::Fixed(rgba) => rgba,
            ColorMode::PerTriangle { seed } => hashed_color(seed, ordinal),
        }
    }
}

/// Extraction parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractConfig {
    /// Isosurface threshold.
    pub iso_level: f32,
    /// Interpolate edge crossings; midpoints otherwise.
    pub interpolate: bool,
    /// Uniform factor applied to every output position.
    pub mesh_scale: f32,
    /// Vertex colour assignment.
    pub color: ColorMode,
    /// Split the pass over X-slabs. Ignored without the `parallel` feature.
    pub parallel: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            iso_level: 0.0,
            interpolate: true,
            mesh_scale: 1.0,
            color: ColorMode::default(),
            parallel: true,
        }
    }
}

impl ExtractConfig {
    /// Set the isosurface threshold.
    pub fn with_iso_level(mut self, iso_level: f32) -> Self {
        self.iso_level = iso_level;
        self
    }

    /// Toggle interpolation.
    pub fn with_interpolation(mut self, interpolate: bool) -> Self {
        self.interpolate = interpolate;
        self
    }

    /// Set the output scale.
    pub fn with_mesh_scale(mut self, mesh_scale: f32) -> Self {
        self.mesh_scale = mesh_scale;
        self
    }

    /// Set the colour mode.
    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    /// Toggle the parallel pass.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check every field is in range.
    pub fn validate(&self) -> Result<()> {
        if !self.iso_level.is_finite() {
            return Err(CarveError::config(format!(
                "iso level must be finite, got {}",
                self.iso_level
            )));
        }
        if !self.mesh_scale.is_finite() || self.mesh_scale <= 0.0 {
            return Err(CarveError::config(format!(
                "mesh scale must be finite and > 0, got {}",
                self.mesh_scale
            )));
        }
        Ok(())
    }

    fn march_settings(&self) -> MarchSettings {
        MarchSettings {
            iso_level: self.iso_level,
            interpolate: self.interpolate,
        }
    }
}

/// Extract the isosurface of `grid` into a fresh mesh.
///
/// `uv_extent` is the `(width, height)` that X and Y positions are divided by
/// to form texture coordinates; non-positive components are treated as 1.
pub fn extract(grid: &VoxelGrid, uv_extent: [f32; 2], config: &ExtractConfig) -> ExtractedMesh {
    let mut mesh = ExtractedMesh::new();
    extract_into(grid, uv_extent, config, &mut mesh);
    mesh
}

/// Like [`extract`], rebuilding `mesh` from empty and reusing its buffers.
pub fn extract_into(
    grid: &VoxelGrid,
    uv_extent: [f32; 2],
    config: &ExtractConfig,
    mesh: &mut ExtractedMesh,
) {
    let settings = config.march_settings();
    let triangles = if config.parallel {
        grid_triangles_parallel(grid, &settings)
    } else {
        grid_triangles(grid, &settings)
    };

    mesh.clear();
    let extra = triangles.len() * 3;
    mesh.positions.reserve(extra);
    mesh.indices.reserve(extra);
    mesh.normals.reserve(extra);
    mesh.uvs.reserve(extra);
    mesh.colors.reserve(extra);

    let width = if uv_extent[0] > 0.0 { uv_extent[0] } else { 1.0 };
    let height = if uv_extent[1] > 0.0 { uv_extent[1] } else { 1.0 };
    let origin = grid.origin();
    let cell_size = grid.cell_size();
    let winding = settings.winding();

    for (ordinal, tri) in triangles.iter().enumerate() {
        let world = tri.map(|p| (origin + p * cell_size) * config.mesh_scale);
        let normal = (world[1] - world[0]).cross(world[2] - world[0]).normalize();
        let color = config.color.color(ordinal as u32);

        let base = mesh.positions.len() as u32;
        for p in world {
            mesh.positions.push(p);
            mesh.normals.push(normal);
            mesh.uvs.push([p.x / width, p.y / height]);
            mesh.colors.push(color);
        }
        mesh.indices.extend(winding.iter().map(|&k| base + k as u32));
    }

    log::info!(
        "extracted {} triangles from {} cells",
        mesh.triangle_count(),
        grid.dims().cell_count()
    );
}

/// Triangles of every cell with minimum sample X coordinate `x`.
fn slab_triangles(grid: &VoxelGrid, x: u32, settings: &MarchSettings, out: &mut Vec<GridTriangle>) {
    let dims = grid.dims();
    for y in 0..dims.y {
        for z in 0..dims.z {
            let cell = process_cell(grid, x, y, z, settings);
            out.extend_from_slice(cell.as_slice());
        }
    }
}

/// Sequential pass over all cells.
fn grid_triangles(grid: &VoxelGrid, settings: &MarchSettings) -> Vec<GridTriangle> {
    let mut out = Vec::new();
    for x in 0..grid.dims().x {
        slab_triangles(grid, x, settings, &mut out);
    }
    out
}

#[cfg(feature = "parallel")]
fn grid_triangles_parallel(grid: &VoxelGrid, settings: &MarchSettings) -> Vec<GridTriangle> {
    use rayon::prelude::*;

    let slabs: Vec<Vec<GridTriangle>> = (0..grid.dims().x)
        .into_par_iter()
        .map(|x| {
            let mut out = Vec::new();
            slab_triangles(grid, x, settings, &mut out);
            out
        })
        .collect();
    slabs.concat()
}

#[cfg(not(feature = "parallel"))]
fn grid_triangles_parallel(grid: &VoxelGrid, settings: &MarchSettings) -> Vec<GridTriangle> {
    grid_triangles(grid, settings)
}
