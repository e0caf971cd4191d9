//! A voxelized mesh that can be carved, re-extracted and persisted.
//!
//! Every operation that replaces the grid contents re-extracts the whole
//! mesh and then notifies the navigation sink with the new bounds.

use std::io::{Read, Write};
use std::path::Path;

use carve_core::{Aabb, GridDims, Point3};
use carve_io::{
    load_from_file, load_grid, save_grid, save_to_file, CarveIoError, DistanceSampler, Placement,
    ReferenceMesh, VoxelGrid, MAX_SAMPLES,
};

use crate::config::BodyConfig;
use crate::error::{CarveError, Result};
use crate::extract::extract_into;
use crate::mesh::ExtractedMesh;
use crate::nav::{NavStatus, NavigationSink, NoNavigation};

/// Grid dimensions covering `bounds` with `padding` extra cells per side.
///
/// Fails before any allocation when the sample count would exceed
/// [`MAX_SAMPLES`].
pub fn grid_dims_for(bounds: &Aabb, cell_size: f32, padding: u32) -> Result<GridDims> {
    let extent = bounds.extent();
    let axis = |e: f32| libm::ceil(e as f64 / cell_size as f64) + 2.0 * padding as f64;
    let cells = [axis(extent.x), axis(extent.y), axis(extent.z)];
    let samples: f64 = cells.iter().map(|c| c + 1.0).product();
    if !samples.is_finite() || samples > MAX_SAMPLES as f64 {
        return Err(CarveIoError::GridTooLarge {
            samples: samples.min(u64::MAX as f64) as u64,
            limit: MAX_SAMPLES,
        }
        .into());
    }
    Ok(GridDims::new(cells[0] as u32, cells[1] as u32, cells[2] as u32))
}

/// Voxel representation of one placed mesh, plus its current surface.
pub struct VoxelBody {
    sampler: Option<DistanceSampler>,
    grid: VoxelGrid,
    mesh: ExtractedMesh,
    config: BodyConfig,
    placement: Placement,
    uv_extent: [f32; 2],
    nav: Box<dyn NavigationSink>,
}

impl VoxelBody {
    /// Voxelize `mesh` placed in the world by `placement`.
    ///
    /// The grid covers the world-space bounds of the mesh plus
    /// `config.padding_cells` on every side.
    ///
    /// # Errors
    /// `Config` for an invalid configuration or a mesh with a flat bounding
    /// box; `Io(GridTooLarge)` when the grid would exceed [`MAX_SAMPLES`].
    /// Both are reported before the grid is allocated.
    pub fn from_mesh(mesh: ReferenceMesh, placement: Placement, config: BodyConfig) -> Result<Self> {
        config.validate()?;
        placement.validate()?;

        let world = placement.transform_bounds(mesh.bounds());
        if !world.has_volume() {
            return Err(CarveError::config(
                "reference mesh bounding box has no volume",
            ));
        }
        let dims = grid_dims_for(&world, config.cell_size, config.padding_cells)?;
        let origin = world.min - Point3::splat(config.padding_cells as f32 * config.cell_size);

        let sampler = DistanceSampler::new(mesh, config.sampler.clone())?;
        let mut grid = VoxelGrid::new(dims, config.cell_size, origin)?;
        grid.build(&sampler, &placement);

        let extent = world.extent();
        let mut body = Self {
            sampler: Some(sampler),
            grid,
            mesh: ExtractedMesh::new(),
            config,
            placement,
            uv_extent: [extent.x, extent.y],
            nav: Box::new(NoNavigation),
        };
        body.extract();
        Ok(body)
    }

    /// Wrap an existing grid, e.g. one restored from disk.
    ///
    /// There is no reference mesh, so [`rebuild`](Self::rebuild) does nothing
    /// and texture coordinates span the grid extent. `config.cell_size` is
    /// ignored in favour of the grid's own.
    pub fn from_grid(grid: VoxelGrid, placement: Placement, config: BodyConfig) -> Result<Self> {
        config.validate()?;
        placement.validate()?;
        log::warn!("voxel body created without a reference mesh; rebuild is unavailable");

        let extent = grid.bounds().extent();
        let mut body = Self {
            sampler: None,
            grid,
            mesh: ExtractedMesh::new(),
            config,
            placement,
            uv_extent: [extent.x, extent.y],
            nav: Box::new(NoNavigation),
        };
        body.extract();
        Ok(body)
    }

    /// Route mesh change notifications to `sink`, which is told about the
    /// current mesh immediately.
    pub fn with_navigation<S: NavigationSink + 'static>(mut self, sink: S) -> Self {
        self.nav = Box::new(sink);
        self.notify();
        self
    }

    /// Rebuild the mesh from the current grid.
    pub fn extract(&mut self) -> &ExtractedMesh {
        extract_into(&self.grid, self.uv_extent, &self.config.extract, &mut self.mesh);
        self.notify();
        &self.mesh
    }

    /// Carve a sphere of mesh-local `radius` around the world point `center`.
    ///
    /// Re-extracts when at least one sample changed. Returns the number of
    /// samples affected.
    pub fn carve(&mut self, center: Point3, radius: f32) -> usize {
        let affected = self
            .grid
            .carve(center, radius, &self.placement, self.config.carve_depth);
        if affected > 0 {
            self.extract();
        }
        affected
    }

    /// Write the grid in `.vox` format.
    pub fn save<W: Write>(&self, writer: &mut W) -> Result<()> {
        save_grid(&self.grid, writer)?;
        Ok(())
    }

    /// Replace the grid with one read from `reader` and re-extract.
    ///
    /// The loaded grid keeps the current origin and has no edit flags. On
    /// error the body is unchanged.
    pub fn load<R: Read>(&mut self, reader: &mut R) -> Result<()> {
        let grid = load_grid(reader, self.grid.origin())?;
        self.replace_grid(grid);
        Ok(())
    }

    fn replace_grid(&mut self, grid: VoxelGrid) {
        if grid.dims() != self.grid.dims() {
            log::info!(
                "loaded grid changes dims from {:?} to {:?}",
                self.grid.dims(),
                grid.dims()
            );
        }
        self.grid = grid;
        self.extract();
    }

    /// [`save`](Self::save) to a file.
    pub fn save_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save_to_file(&self.grid, path)?;
        Ok(())
    }

    /// [`load`](Self::load) from a file.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let grid = load_from_file(path, self.grid.origin())?;
        self.replace_grid(grid);
        Ok(())
    }

    /// Re-sample the grid from the reference mesh, discarding carves.
    ///
    /// Returns `false` and leaves everything untouched when the body has no
    /// reference mesh.
    pub fn rebuild(&mut self) -> bool {
        let Some(sampler) = &self.sampler else {
            log::warn!("rebuild requested but the body has no reference mesh");
            return false;
        };
        self.grid.build(sampler, &self.placement);
        self.extract();
        true
    }

    fn notify(&mut self) {
        if self.nav.mesh_changed(self.mesh.bounds()) == NavStatus::Unavailable {
            log::debug!("navigation unavailable; skipped rebuild");
        }
    }

    /// The sample grid.
    #[inline]
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// The current surface.
    #[inline]
    pub fn mesh(&self) -> &ExtractedMesh {
        &self.mesh
    }

    /// Mesh-local to world transform.
    #[inline]
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Active configuration.
    #[inline]
    pub fn config(&self) -> &BodyConfig {
        &self.config
    }

    /// The reference mesh, if the body was built from one.
    pub fn reference_mesh(&self) -> Option<&ReferenceMesh> {
        self.sampler.as_ref().map(DistanceSampler::mesh)
    }

    /// Width and height that texture coordinates are normalized by.
    #[inline]
    pub fn uv_extent(&self) -> [f32; 2] {
        self.uv_extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(min: f32, max: f32) -> ReferenceMesh {
        let positions = vec![
            Point3::new(min, min, min),
            Point3::new(max, min, min),
            Point3::new(max, max, min),
            Point3::new(min, max, min),
            Point3::new(min, min, max),
            Point3::new(max, min, max),
            Point3::new(max, max, max),
            Point3::new(min, max, max),
        ];
        let indices = [
            0, 2, 1, 0, 3, 2, 4, 5, 6, 4, 6, 7, 0, 1, 5, 0, 5, 4, 3, 7, 6, 3, 6, 2, 0, 4, 7, 0, 7,
            3, 1, 2, 6, 1, 6, 5,
        ];
        ReferenceMesh::new(positions, &indices).unwrap()
    }

    #[test]
    fn test_grid_dims_for() {
        let bounds = Aabb::new(Point3::ZERO, Point3::new(1.0, 2.0, 0.3));
        assert_eq!(grid_dims_for(&bounds, 0.5, 0).unwrap(), GridDims::new(2, 4, 1));
        assert_eq!(grid_dims_for(&bounds, 0.5, 2).unwrap(), GridDims::new(6, 8, 5));

        let huge = Aabb::new(Point3::ZERO, Point3::splat(1000.0));
        assert!(matches!(
            grid_dims_for(&huge, 0.1, 0),
            Err(CarveError::Io(CarveIoError::GridTooLarge { .. }))
        ));
    }

    #[test]
    fn test_from_mesh_layout() {
        let body = VoxelBody::from_mesh(
            cube(-1.0, 1.0),
            Placement::new(Point3::new(5.0, 0.0, 0.0), 2.0),
            BodyConfig::new(1.0),
        )
        .unwrap();
        // World bounds are [3, 7] x [-2, 2] x [-2, 2], padded by one cell.
        assert_eq!(body.grid().dims(), GridDims::cube(6));
        assert_eq!(body.grid().origin(), Point3::new(2.0, -3.0, -3.0));
        assert_eq!(body.uv_extent(), [4.0, 4.0]);
        assert!(body.reference_mesh().is_some());
        assert!(!body.mesh().is_empty());
    }

    #[test]
    fn test_rejects_flat_mesh() {
        let flat = ReferenceMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            &[0, 1, 2],
        )
        .unwrap();
        let result = VoxelBody::from_mesh(flat, Placement::IDENTITY, BodyConfig::new(0.5));
        assert!(matches!(result, Err(CarveError::Config { .. })));
    }

    #[test]
    fn test_rejects_bad_placement() {
        let result = VoxelBody::from_mesh(
            cube(0.0, 1.0),
            Placement::new(Point3::ZERO, 0.0),
            BodyConfig::new(0.5),
        );
        assert!(matches!(
            result,
            Err(CarveError::Io(CarveIoError::InvalidConfig { .. }))
        ));
    }

    #[test]
    fn test_rebuild_without_mesh_is_noop() {
        let grid = VoxelGrid::new(GridDims::cube(2), 1.0, Point3::ZERO).unwrap();
        let mut body = VoxelBody::from_grid(grid.clone(), Placement::IDENTITY, BodyConfig::default())
            .unwrap();
        assert!(!body.rebuild());
        assert_eq!(body.grid(), &grid);
        assert_eq!(body.uv_extent(), [2.0, 2.0]);
    }

    #[test]
    fn test_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("carve_rs_body_{}.vox", std::process::id()));
        let mut carved =
            VoxelBody::from_mesh(cube(0.0, 4.0), Placement::IDENTITY, BodyConfig::new(1.0))
                .unwrap();
        carved.carve(Point3::new(4.0, 2.0, 2.0), 1.5);
        carved.save_file(&path).unwrap();

        let mut fresh =
            VoxelBody::from_mesh(cube(0.0, 4.0), Placement::IDENTITY, BodyConfig::new(1.0))
                .unwrap();
        fresh.load_file(&path).unwrap();
        assert_eq!(fresh.grid().samples(), carved.grid().samples());
        assert_eq!(fresh.grid().edited_count(), 0);
        assert_eq!(fresh.mesh(), carved.mesh());

        std::fs::remove_file(&path).unwrap();
        let before = fresh.grid().clone();
        assert!(matches!(
            fresh.load_file(&path),
            Err(CarveError::Io(CarveIoError::Io(_)))
        ));
        assert_eq!(fresh.grid(), &before);
    }

    #[test]
    fn test_rebuild_discards_carves() {
        let mut body =
            VoxelBody::from_mesh(cube(0.0, 4.0), Placement::IDENTITY, BodyConfig::new(1.0))
                .unwrap();
        let before = body.grid().clone();
        assert!(body.carve(Point3::splat(2.0), 1.5) > 0);
        assert_ne!(body.grid(), &before);
        assert!(body.rebuild());
        assert_eq!(body.grid(), &before);
        assert_eq!(body.grid().edited_count(), 0);
    }
}
