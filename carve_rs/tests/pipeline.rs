//! End-to-end behaviour of voxel bodies: build, extract, carve, persist.

use std::io::Cursor;
use std::sync::{Arc, Mutex};

use carve_rs::prelude::*;
use carve_io::load_grid;
use carve_rs::{extract, CarveIoError};
use proptest::prelude::*;

// =============================================================================
// Fixtures
// =============================================================================

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
        0, 2, 1, 0, 3, 2, // z = min
        4, 5, 6, 4, 6, 7, // z = max
        0, 1, 5, 0, 5, 4, // y = min
        3, 7, 6, 3, 6, 2, // y = max
        0, 4, 7, 0, 7, 3, // x = min
        1, 2, 6, 1, 6, 5, // x = max
    ];
    ReferenceMesh::new(positions, &indices).unwrap()
}

fn cube_body() -> VoxelBody {
    VoxelBody::from_mesh(cube(0.0, 4.0), Placement::IDENTITY, BodyConfig::new(0.5)).unwrap()
}

/// Sphere of radius `r` around the grid centre, positive inside.
fn sphere_grid(n: u32, r: f32) -> VoxelGrid {
    let dims = GridDims::cube(n);
    let c = n as f32 / 2.0;
    let samples = (0..dims.sample_count())
        .map(|i| {
            let s = n as usize + 1;
            let p = Point3::new((i % s) as f32, ((i / s) % s) as f32, (i / (s * s)) as f32);
            r - p.distance(Point3::splat(c))
        })
        .collect();
    VoxelGrid::from_samples(dims, 1.0, Point3::new(-c, -c, -c), samples).unwrap()
}

fn recording_sink() -> (Arc<Mutex<Vec<Aabb>>>, impl NavigationSink) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink_log = Arc::clone(&log);
    let sink = move |bounds: Aabb| {
        sink_log.lock().unwrap().push(bounds);
        NavStatus::Rebuilt
    };
    (log, sink)
}

// =============================================================================
// Extraction
// =============================================================================

#[test]
fn cube_surface_hugs_reference_bounds() {
    let body = cube_body();
    let mesh = body.mesh();
    assert!(!mesh.is_empty());
    assert_eq!(mesh.indices.len() % 3, 0);
    assert_eq!(mesh.normals.len(), mesh.positions.len());
    assert_eq!(mesh.uvs.len(), mesh.positions.len());
    assert_eq!(mesh.colors.len(), mesh.positions.len());

    let bounds = mesh.bounds();
    let cell = body.grid().cell_size();
    for axis in 0..3 {
        assert!(bounds.min.axis(axis) >= -cell && bounds.min.axis(axis) <= cell);
        assert!(bounds.max.axis(axis) >= 4.0 - cell && bounds.max.axis(axis) <= 4.0 + cell);
    }
    let stats = MeshStats::from_mesh(mesh);
    assert!((stats.surface_area - 96.0).abs() < 24.0, "{}", stats.surface_area);
}

#[test]
fn extraction_is_idempotent() {
    let mut body = cube_body();
    let first = body.mesh().clone();
    let second = body.extract().clone();
    assert_eq!(first, second);
}

#[test]
fn parallel_extraction_matches_sequential() {
    let grid = sphere_grid(12, 4.3);
    let parallel = ExtractConfig::default().with_parallel(true);
    let sequential = ExtractConfig::default().with_parallel(false);
    let a = extract(&grid, [12.0, 12.0], &parallel);
    let b = extract(&grid, [12.0, 12.0], &sequential);
    assert!(!a.is_empty());
    assert_eq!(a, b);
}

#[test]
fn interpolation_off_places_vertices_on_half_cells() {
    let grid = sphere_grid(8, 2.7);
    let config = ExtractConfig::default().with_interpolation(false);
    let mesh = extract(&grid, [8.0, 8.0], &config);
    for p in &mesh.positions {
        let halves = [p.x, p.y, p.z]
            .iter()
            .filter(|c| (c.fract().abs() - 0.5).abs() < 1e-6)
            .count();
        assert_eq!(halves, 1, "{:?}", p);
    }
}

// =============================================================================
// Carving
// =============================================================================

#[test]
fn carve_opens_a_cavity() {
    let mut body = cube_body();
    let inside_before = body.grid().inside_count();
    let triangles_before = body.mesh().triangle_count();

    let affected = body.carve(Point3::splat(2.0), 1.0);
    assert!(affected > 0);
    assert_eq!(body.grid().edited_count(), affected);
    assert!(body.grid().inside_count() < inside_before);
    // The cavity adds an inner surface.
    assert!(body.mesh().triangle_count() > triangles_before);

    let floor = -body.config().carve_depth * body.grid().cell_size();
    // Sample (5, 5, 5) sits exactly at the carve centre.
    assert!(body.grid().get(5, 5, 5) <= floor);
}

#[test]
fn carve_radius_scales_with_placement() {
    let placement = Placement::new(Point3::ZERO, 2.0);
    let mut body =
        VoxelBody::from_mesh(cube(0.0, 2.0), placement, BodyConfig::new(0.5)).unwrap();
    // Local radius 0.5 reaches one world unit.
    let affected = body.carve(Point3::splat(2.0), 0.5);
    // Samples at distance < 1 on a 0.5 lattice: 1 + 6 + 12 + 8.
    assert_eq!(affected, 27);
}

#[test]
fn carve_far_away_changes_nothing() {
    let (log, sink) = recording_sink();
    let mut body = cube_body().with_navigation(sink);
    let before = body.mesh().clone();
    assert_eq!(body.carve(Point3::splat(100.0), 1.0), 0);
    assert_eq!(body.mesh(), &before);
    assert_eq!(log.lock().unwrap().len(), 1);
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn load_restores_carved_state() {
    let mut carved = cube_body();
    carved.carve(Point3::new(0.0, 2.0, 2.0), 1.5);
    let mut bytes = Vec::new();
    carved.save(&mut bytes).unwrap();

    let mut fresh = cube_body();
    fresh.load(&mut Cursor::new(bytes)).unwrap();
    assert_eq!(fresh.grid().samples(), carved.grid().samples());
    assert_eq!(fresh.grid().edited_count(), 0);
    assert_eq!(fresh.mesh(), carved.mesh());
}

#[test]
fn failed_load_leaves_body_untouched() {
    let (log, sink) = recording_sink();
    let mut body = cube_body().with_navigation(sink);
    body.carve(Point3::splat(2.0), 1.0);
    let grid = body.grid().clone();
    let mesh = body.mesh().clone();
    let notified = log.lock().unwrap().len();

    let mut bytes = Vec::new();
    body.save(&mut bytes).unwrap();
    bytes[16..20].copy_from_slice(&(-5i32).to_le_bytes());
    let err = body.load(&mut Cursor::new(bytes)).unwrap_err();
    assert!(matches!(
        err,
        CarveError::Io(CarveIoError::CorruptData { .. })
    ));

    let truncated = vec![0u8; 7];
    assert!(body.load(&mut Cursor::new(truncated)).is_err());

    assert_eq!(body.grid(), &grid);
    assert_eq!(body.mesh(), &mesh);
    assert_eq!(log.lock().unwrap().len(), notified);
}

#[test]
fn body_from_loaded_grid() {
    let carved = cube_body();
    let mut bytes = Vec::new();
    carved.save(&mut bytes).unwrap();
    let grid = load_grid(&mut Cursor::new(bytes), carved.grid().origin()).unwrap();
    let mut body = VoxelBody::from_grid(grid, Placement::IDENTITY, BodyConfig::default()).unwrap();
    assert!(body.reference_mesh().is_none());
    assert_eq!(body.mesh().triangle_count(), carved.mesh().triangle_count());
    assert!(!body.rebuild());
}

// =============================================================================
// Navigation
// =============================================================================

#[test]
fn navigation_sees_every_mesh_change() {
    let (log, sink) = recording_sink();
    let mut body = cube_body().with_navigation(sink);
    assert_eq!(log.lock().unwrap().len(), 1);
    assert_eq!(log.lock().unwrap()[0], body.mesh().bounds());

    body.carve(Point3::new(4.0, 4.0, 4.0), 1.0);
    body.rebuild();
    body.extract();
    let seen = log.lock().unwrap();
    assert_eq!(seen.len(), 4);
    assert_eq!(*seen.last().unwrap(), body.mesh().bounds());
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn surface_stays_inside_grid(
        cx in -1.0f32..5.0,
        cy in -1.0f32..5.0,
        cz in -1.0f32..5.0,
        r in 0.1f32..2.5,
    ) {
        let mut body = cube_body();
        body.carve(Point3::new(cx, cy, cz), r);
        let grid_bounds = body.grid().bounds();
        for p in &body.mesh().positions {
            for axis in 0..3 {
                prop_assert!(p.axis(axis) >= grid_bounds.min.axis(axis) - 1e-4);
                prop_assert!(p.axis(axis) <= grid_bounds.max.axis(axis) + 1e-4);
            }
        }
        prop_assert_eq!(body.mesh().indices.len() % 3, 0);
    }
}
