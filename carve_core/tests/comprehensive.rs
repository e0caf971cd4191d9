//! Behavioural suite for carve_core.
//!
//! # Test Categories
//!
//! 1. **Indexing** - linear sample index is a bijection
//! 2. **Triangle geometry** - closest-point distance invariants
//! 3. **Table invariants** - edge/triangle tables agree with each other
//! 4. **Cell scenarios** - concrete single-cell cases

use carve_core::marching_cubes::{
    edge_mask, march_cell, MarchSettings, CORNER_OFFSETS, EDGE_DIRECTIONS, EDGE_TABLE,
    EDGE_VERTICES, TRI_TABLE,
};
use carve_core::prelude::*;
use proptest::prelude::*;

// =============================================================================
// 1. Indexing
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn index_is_bijection(dx in 0u32..6, dy in 0u32..6, dz in 0u32..6) {
        let dims = GridDims::new(dx, dy, dz);
        let mut seen = vec![false; dims.sample_count()];
        for z in 0..=dz {
            for y in 0..=dy {
                for x in 0..=dx {
                    let i = sample_index(dims, x, y, z);
                    prop_assert!(i < dims.sample_count());
                    prop_assert!(!seen[i], "collision at {:?}", (x, y, z));
                    seen[i] = true;
                    prop_assert_eq!(sample_coord(dims, i), (x, y, z));
                }
            }
        }
        prop_assert!(seen.iter().all(|&s| s));
    }
}

// =============================================================================
// 2. Triangle geometry
// =============================================================================

fn point() -> impl Strategy<Value = Point3> {
    (-5.0f32..5.0, -5.0f32..5.0, -5.0f32..5.0).prop_map(|(x, y, z)| Point3::new(x, y, z))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn distance_non_negative_and_relabel_symmetric(
        p in point(), a in point(), b in point(), c in point()
    ) {
        let d = point_triangle_distance(p, a, b, c);
        prop_assert!(d >= 0.0);
        for (u, v, w) in [(a, c, b), (b, a, c), (b, c, a), (c, a, b), (c, b, a)] {
            let d2 = point_triangle_distance(p, u, v, w);
            prop_assert!((d - d2).abs() <= 1e-3 * (1.0 + d), "{} vs {}", d, d2);
        }
    }

    #[test]
    fn distance_zero_on_face(
        a in point(), b in point(), c in point(),
        s in 0.0f32..1.0, t in 0.0f32..1.0
    ) {
        prop_assume!((b - a).cross(c - a).length() > 1e-2);
        // Fold into the triangle: u + v <= 1
        let (u, v) = if s + t > 1.0 { (1.0 - s, 1.0 - t) } else { (s, t) };
        let p = a + (b - a) * u + (c - a) * v;
        let d = point_triangle_distance(p, a, b, c);
        prop_assert!(d < 1e-3, "distance {} for on-face point", d);
    }

    #[test]
    fn closest_point_is_no_farther_than_vertices(
        p in point(), a in point(), b in point(), c in point()
    ) {
        let d = point_triangle_distance(p, a, b, c);
        let nearest_vertex = p.distance(a).min(p.distance(b)).min(p.distance(c));
        prop_assert!(d <= nearest_vertex + 1e-4);
    }
}

// =============================================================================
// 3. Table invariants
// =============================================================================

#[test]
fn edge_directions_match_corner_offsets() {
    for (edge, &(a, b)) in EDGE_VERTICES.iter().enumerate() {
        let (ax, ay, az) = CORNER_OFFSETS[a];
        let (bx, by, bz) = CORNER_OFFSETS[b];
        let (dx, dy, dz) = EDGE_DIRECTIONS[edge];
        assert_eq!(bx as f32 - ax as f32, dx, "edge {}", edge);
        assert_eq!(by as f32 - ay as f32, dy, "edge {}", edge);
        assert_eq!(bz as f32 - az as f32, dz, "edge {}", edge);
    }
}

#[test]
fn edge_table_flags_exactly_sign_changing_edges() {
    for mask in 0..256usize {
        let mut expected = 0u16;
        for (edge, &(a, b)) in EDGE_VERTICES.iter().enumerate() {
            if ((mask >> a) & 1) != ((mask >> b) & 1) {
                expected |= 1 << edge;
            }
        }
        assert_eq!(EDGE_TABLE[mask], expected, "mask {:#04x}", mask);
    }
}

#[test]
fn edge_table_symmetric_under_complement() {
    for mask in 0..256usize {
        assert_eq!(EDGE_TABLE[mask], EDGE_TABLE[255 - mask]);
    }
}

#[test]
fn tri_table_references_only_flagged_edges() {
    for mask in 0..256usize {
        let row = &TRI_TABLE[mask];
        let mut ended = false;
        let mut count = 0;
        for tri in row.chunks_exact(3) {
            if tri[0] < 0 {
                ended = true;
                continue;
            }
            assert!(!ended, "mask {:#04x} has entries after terminator", mask);
            for &e in tri {
                assert!((0..12).contains(&e), "mask {:#04x} edge {}", mask, e);
                assert!(EDGE_TABLE[mask] & (1 << e) != 0, "mask {:#04x} edge {}", mask, e);
            }
            count += 1;
        }
        assert!(count <= 5);
        assert_eq!(row[15], -1);
        assert_eq!(count == 0, EDGE_TABLE[mask] == 0, "mask {:#04x}", mask);
    }
}

// =============================================================================
// 4. Cell scenarios
// =============================================================================

#[test]
fn uniform_masks_have_no_edges() {
    assert_eq!(edge_mask(0x00), 0);
    assert_eq!(edge_mask(0xFF), 0);
}

#[test]
fn all_inside_cube_emits_nothing() {
    let tris = march_cell(&[1.0; 8], (0, 0, 0), &MarchSettings::default());
    assert!(tris.is_empty());
}

#[test]
fn single_outside_corner_emits_one_triangle() {
    let mut corners = [1.0f32; 8];
    corners[0] = -1.0;
    let settings = MarchSettings::default();

    let mask = carve_core::marching_cubes::vertex_mask(&corners, settings.iso_level);
    assert_eq!(mask, 0x01);
    assert_eq!(edge_mask(mask).count_ones(), 3);

    let tris = march_cell(&corners, (0, 0, 0), &settings);
    assert_eq!(tris.len(), 1);
    let expected = [
        Point3::new(0.5, 0.0, 0.0),
        Point3::new(0.0, 0.5, 0.0),
        Point3::new(0.0, 0.0, 0.5),
    ];
    for v in &tris.as_slice()[0] {
        assert!(
            expected.iter().any(|e| (*e - *v).length() < 1e-6),
            "unexpected vertex {:?}",
            v
        );
    }
}

#[test]
fn interpolation_tracks_iso_level() {
    let mut corners = [1.0f32; 8];
    corners[0] = -1.0;
    let settings = MarchSettings {
        iso_level: 0.5,
        interpolate: true,
    };
    let tris = march_cell(&corners, (0, 0, 0), &settings);
    assert_eq!(tris.len(), 1);
    for v in &tris.as_slice()[0] {
        // (0.5 - -1) / (1 - -1) = 0.75 of the way from corner 0
        assert!((v.length() - 0.75).abs() < 1e-6, "{:?}", v);
    }
}
