//! Per-cell marching cubes.
//!
//! Positions produced here are in grid units: sample `(x, y, z)` sits at
//! `Point3::new(x, y, z)`. Callers scale by cell size and translate by the
//! grid origin.

use crate::traits::SampleProvider;
use crate::types::Point3;

use super::tables::{CORNER_OFFSETS, EDGE_DIRECTIONS, EDGE_TABLE, EDGE_VERTICES, TRI_TABLE};

/// Maximum number of triangles any marching-cubes case emits.
pub const MAX_CELL_TRIANGLES: usize = 5;

/// Isosurface settings shared by every cell of one extraction pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchSettings {
    /// Threshold separating the two sides of the surface.
    pub iso_level: f32,
    /// Place edge crossings by linear interpolation; otherwise at edge midpoints.
    pub interpolate: bool,
}

impl Default for MarchSettings {
    fn default() -> Self {
        Self {
            iso_level: 0.0,
            interpolate: true,
        }
    }
}

impl MarchSettings {
    /// Vertex order applied to each emitted triangle.
    ///
    /// A positive iso level keeps table order; zero or negative reverses it,
    /// flipping the front face to match the sign convention.
    #[inline]
    pub fn winding(&self) -> [usize; 3] {
        if self.iso_level > 0.0 {
            [0, 1, 2]
        } else {
            [2, 1, 0]
        }
    }
}

/// Triangles produced by a single cell, stored inline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellTriangles {
    triangles: [[Point3; 3]; MAX_CELL_TRIANGLES],
    count: usize,
}

impl CellTriangles {
    /// Number of triangles.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// True when the cell produced no geometry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The emitted triangles in table order.
    #[inline]
    pub fn as_slice(&self) -> &[[Point3; 3]] {
        &self.triangles[..self.count]
    }

    #[inline]
    fn push(&mut self, tri: [Point3; 3]) {
        self.triangles[self.count] = tri;
        self.count += 1;
    }
}

/// 8-bit corner mask: bit `i` is set when `corners[i] <= iso_level`.
#[inline]
pub fn vertex_mask(corners: &[f32; 8], iso_level: f32) -> u8 {
    let mut mask = 0u8;
    for (i, &value) in corners.iter().enumerate() {
        if value <= iso_level {
            mask |= 1 << i;
        }
    }
    mask
}

/// 12-bit mask of the cube edges crossed for a given corner mask.
#[inline]
pub fn edge_mask(vertex_mask: u8) -> u16 {
    EDGE_TABLE[vertex_mask as usize]
}

/// Fraction along an edge from `v0` to `v1` where the field reaches `iso_level`.
///
/// When the two values are equal the result is `iso_level` itself.
#[inline]
pub fn interpolation_offset(v0: f32, v1: f32, iso_level: f32) -> f32 {
    let delta = v1 - v0;
    if delta == 0.0 {
        iso_level
    } else {
        (iso_level - v0) / delta
    }
}

/// Read the 8 corner samples of the cell whose minimum sample is `(x, y, z)`.
///
/// Requires `x < dims.x`, `y < dims.y`, `z < dims.z`.
#[inline]
pub fn gather_corners<P: SampleProvider + ?Sized>(provider: &P, x: u32, y: u32, z: u32) -> [f32; 8] {
    let mut corners = [0.0f32; 8];
    for (i, &(dx, dy, dz)) in CORNER_OFFSETS.iter().enumerate() {
        corners[i] = provider.sample(x + dx, y + dy, z + dz);
    }
    corners
}

/// Triangulate one cell from its corner values.
///
/// `cell` is the cell's minimum sample coordinate. Triangles keep table
/// vertex order; apply [`MarchSettings::winding`] when emitting.
pub fn march_cell(corners: &[f32; 8], cell: (u32, u32, u32), settings: &MarchSettings) -> CellTriangles {
    let mut out = CellTriangles::default();

    let mask = vertex_mask(corners, settings.iso_level);
    let edges = edge_mask(mask);
    if edges == 0 {
        return out;
    }

    let base = Point3::new(cell.0 as f32, cell.1 as f32, cell.2 as f32);
    let mut edge_points = [Point3::ZERO; 12];
    for (edge, point) in edge_points.iter_mut().enumerate() {
        if edges & (1 << edge) == 0 {
            continue;
        }
        let (a, b) = EDGE_VERTICES[edge];
        let offset = if settings.interpolate {
            interpolation_offset(corners[a], corners[b], settings.iso_level)
        } else {
            0.5
        };
        let (ox, oy, oz) = CORNER_OFFSETS[a];
        let (dx, dy, dz) = EDGE_DIRECTIONS[edge];
        *point = base
            + Point3::new(
                ox as f32 + offset * dx,
                oy as f32 + offset * dy,
                oz as f32 + offset * dz,
            );
    }

    let row = &TRI_TABLE[mask as usize];
    for tri in row.chunks_exact(3) {
        if tri[0] < 0 {
            break;
        }
        out.push([
            edge_points[tri[0] as usize],
            edge_points[tri[1] as usize],
            edge_points[tri[2] as usize],
        ]);
    }
    out
}

/// Gather and triangulate the cell at `(x, y, z)`.
#[inline]
pub fn process_cell<P: SampleProvider + ?Sized>(
    provider: &P,
    x: u32,
    y: u32,
    z: u32,
    settings: &MarchSettings,
) -> CellTriangles {
    let corners = gather_corners(provider, x, y, z);
    march_cell(&corners, (x, y, z), settings)
}
