//! Edge case and regression tests for `DelaunayTriangulation`.
//!
//! These tests cover:
//! - Known small configurations with a fixed face count
//! - Degenerate configurations (collinear, duplicate, cocircular points)
//! - Precondition failures
//! - Extreme coordinate values

use approx::assert_relative_eq;
use delaunay2d::prelude::*;

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Sum of absolute triangle areas.
fn total_area(dt: &DelaunayTriangulation<f64>) -> f64 {
    dt.triangles()
        .map(|[a, b, c]| signed_area_determinant(&a, &b, &c).abs() / 2.0)
        .sum()
}

// =========================================================================
// Known configurations
// =========================================================================

#[test]
fn test_hexagon_produces_four_triangles() {
    init_tracing();
    let points = vec![
        point!(-2.0, 0.0),
        point!(-1.0, 1.0),
        point!(-1.0, -1.0),
        point!(1.0, -1.0),
        point!(1.0, 1.0),
        point!(2.0, 0.0),
    ];

    let dt = DelaunayTriangulation::new(&points).unwrap();

    assert_eq!(dt.number_of_vertices(), 6);
    assert_eq!(dt.number_of_faces(), 4);
    assert!(dt.validate_delaunay().is_ok());
    // Hexagon area: 2x2 square plus two unit-height triangles.
    assert_relative_eq!(total_area(&dt), 6.0, epsilon = 1e-12);

    for [a, b, c] in dt.triangles() {
        for p in [a, b, c] {
            assert!(points.contains(&p));
        }
    }
}

#[test]
fn test_three_points_produce_one_triangle() {
    init_tracing();
    let points = vec![point!(0.0, 0.0), point!(1.0, 0.0), point!(0.0, 1.0)];

    let dt = DelaunayTriangulation::new(&points).unwrap();

    assert_eq!(dt.number_of_faces(), 1);
    let [a, b, c] = dt.triangles().next().unwrap();
    let mut corners: Vec<[f64; 2]> = [a, b, c].iter().map(Point::xy).collect();
    corners.sort_by(|p, q| p.partial_cmp(q).unwrap());
    assert_eq!(corners, vec![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0]]);
}

#[test]
fn test_faces_are_stored_clockwise() {
    let points = vec![
        point!(0.0, 0.0),
        point!(5.0, 0.5),
        point!(2.0, 4.0),
        point!(2.5, 1.5),
        point!(-1.0, 3.0),
    ];

    let dt = DelaunayTriangulation::new(&points).unwrap();
    assert!(dt.number_of_faces() > 0);
    for [a, b, c] in dt.triangles() {
        assert_eq!(orientation_2d(&a, &b, &c), Orientation::NEGATIVE);
    }
}

#[test]
fn test_square_with_center() {
    let points = vec![
        point!(0.0, 0.0),
        point!(4.0, 0.0),
        point!(4.0, 4.0),
        point!(0.0, 4.0),
        point!(2.0, 2.0),
    ];

    let dt = DelaunayTriangulation::new(&points).unwrap();
    assert_eq!(dt.number_of_faces(), 4);
    assert_relative_eq!(total_area(&dt), 16.0, epsilon = 1e-12);
    assert!(dt.validate_delaunay().is_ok());
}

// =========================================================================
// Degenerate configurations
// =========================================================================

#[test]
fn test_collinear_points_yield_no_faces() {
    init_tracing();
    let points = vec![point!(0.0, 0.0), point!(1.0, 0.0), point!(2.0, 0.0)];

    let dt = DelaunayTriangulation::new(&points).unwrap();

    assert_eq!(dt.number_of_vertices(), 3);
    assert_eq!(dt.number_of_faces(), 0);

    let diagonal: Vec<_> = (0..6).map(|i| point!(f64::from(i), f64::from(i))).collect();
    let dt = DelaunayTriangulation::new(&diagonal).unwrap();
    assert_eq!(dt.number_of_vertices(), 6);
    assert_eq!(dt.number_of_faces(), 0);
}

#[test]
fn test_duplicate_point_is_isolated() {
    init_tracing();
    let points = vec![
        point!(0.0, 0.0),
        point!(0.0, 0.0),
        point!(0.0, 3.0),
        point!(4.0, 0.0),
    ];

    let dt = DelaunayTriangulation::new(&points).unwrap();

    assert_eq!(dt.number_of_vertices(), 4);
    assert_eq!(dt.number_of_faces(), 1);
    assert_eq!(dt.statistics().insertion.empty_cavities, 1);

    let mesh = dt.mesh();
    let isolated = mesh
        .vertices()
        .filter(|(key, _)| mesh.is_isolated(*key))
        .count();
    assert_eq!(isolated, 1);
}

#[test]
fn test_cocircular_grid() {
    let grid = generate_grid_points::<f64>(4, 4, 1.0, (0.0, 0.0)).unwrap();

    let dt = DelaunayTriangulation::new(&grid).unwrap();

    assert_eq!(dt.number_of_vertices(), 16);
    assert_eq!(dt.number_of_faces(), 18);
    assert_relative_eq!(total_area(&dt), 9.0, epsilon = 1e-12);
    assert!(dt.validate_delaunay().is_ok());
}

// =========================================================================
// Preconditions
// =========================================================================

#[test]
fn test_fewer_than_three_points_fail() {
    for n in 0..3 {
        let points: Vec<Point<f64>> = (0..n).map(|i| point!(f64::from(i), 0.0)).collect();
        let err = DelaunayTriangulation::new(&points).unwrap_err();
        assert_eq!(
            err,
            TriangulationConstructionError::InsufficientVertices {
                found: usize::try_from(n).unwrap()
            }
        );
    }
}

#[test]
fn test_non_finite_points_fail() {
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let points = vec![point!(0.0, 0.0), point!(1.0, 0.0), point!(bad, 1.0)];
        let err = DelaunayTriangulation::new(&points).unwrap_err();
        assert!(
            matches!(
                err,
                TriangulationConstructionError::InvalidCoordinate { index: 2, .. }
            ),
            "unexpected error: {err}"
        );
    }
}

// =========================================================================
// Coordinate types and ranges
// =========================================================================

#[test]
fn test_f32_coordinates() {
    let points = vec![
        point!(0.0f32, 0.0),
        point!(2.0, 0.0),
        point!(1.0, 2.0),
        point!(1.0, 0.7),
    ];

    let dt = DelaunayTriangulation::new(&points).unwrap();
    assert_eq!(dt.number_of_faces(), 3);
    assert!(dt.validate_delaunay().is_ok());
}

#[test]
fn test_offset_and_scaled_coordinates() {
    // Far from the origin and large in magnitude.
    let points: Vec<_> = [
        (0.0, 0.0),
        (1.0, 0.0),
        (0.0, 1.0),
        (1.0, 1.2),
        (0.4, 0.5),
    ]
    .iter()
    .map(|&(x, y)| point!(1.0e6 + x * 1.0e3, 2.0e6 + y * 1.0e3))
    .collect();

    let dt = DelaunayTriangulation::new(&points).unwrap();
    assert_eq!(dt.number_of_vertices(), 5);
    assert_eq!(dt.number_of_faces(), 4);
    assert!(dt.validate_delaunay().is_ok());
}

#[test]
fn test_z_coordinate_is_carried() {
    let points = vec![
        point!(0.0, 0.0, 7.0),
        point!(1.0, 0.0, 8.0),
        point!(0.0, 1.0, 9.0),
    ];

    let dt = DelaunayTriangulation::new(&points).unwrap();
    let mut zs: Vec<f64> = dt.mesh().vertices().map(|(_, p)| p.z()).collect();
    zs.sort_by(f64::total_cmp);
    assert_eq!(zs, vec![7.0, 8.0, 9.0]);
}

#[test]
fn test_validation_flag_runs_on_random_input() {
    let points = generate_random_points_seeded::<f64>(200, (-50.0, 50.0), 42).unwrap();

    let dt = DelaunayTriangulationBuilder::new(&points)
        .validate(true)
        .build()
        .unwrap();

    assert_eq!(dt.number_of_vertices(), 200);
    let stats = dt.statistics();
    assert_eq!(stats.insertion.vertices_inserted, 200);
    assert_eq!(
        stats.finalization.faces_remaining(),
        dt.number_of_faces()
    );
}
