//! Property-based tests for Delaunay-specific properties.
//!
//! - Empty circumcircle condition (no vertex strictly inside)
//! - Consistent (clockwise) face orientation
//! - Edge manifoldness: each undirected edge bounds at most two faces, each
//!   directed edge at most one
//! - No super-triangle vertex survives construction
//! - Planarity: no two face edges cross
//! - Insertion-order robustness: the triangle set does not depend on input order

use delaunay2d::prelude::*;
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

// =============================================================================
// TEST CONFIGURATION
// =============================================================================

fn finite_coordinate() -> impl Strategy<Value = f64> {
    (-100.0..100.0).prop_filter("must be finite", |x: &f64| x.is_finite())
}

fn point_set(max_len: usize) -> impl Strategy<Value = Vec<Point<f64>>> {
    prop::collection::vec((finite_coordinate(), finite_coordinate()), 3..=max_len)
        .prop_map(|coords| dedup_points(coords.into_iter().map(|(x, y)| point!(x, y))))
        .prop_filter("need at least 3 distinct points", |points| points.len() >= 3)
}

/// Drops exact coordinate duplicates, keeping the first occurrence.
fn dedup_points(points: impl IntoIterator<Item = Point<f64>>) -> Vec<Point<f64>> {
    let mut seen = HashSet::new();
    points
        .into_iter()
        .filter(|p| seen.insert(coord_bits(p)))
        .collect()
}

fn coord_bits(p: &Point<f64>) -> [u64; 2] {
    [p.x().to_bits(), p.y().to_bits()]
}

/// Order-independent identity of a triangle by its corner coordinates.
fn triangle_id(tri: &[Point<f64>; 3]) -> [[u64; 2]; 3] {
    let mut id = [coord_bits(&tri[0]), coord_bits(&tri[1]), coord_bits(&tri[2])];
    id.sort_unstable();
    id
}

/// Proper crossing of segments `ab` and `cd` (shared endpoints do not count).
fn segments_cross(a: &Point<f64>, b: &Point<f64>, c: &Point<f64>, d: &Point<f64>) -> bool {
    let o1 = orientation_2d(a, b, c);
    let o2 = orientation_2d(a, b, d);
    let o3 = orientation_2d(c, d, a);
    let o4 = orientation_2d(c, d, b);
    o1 != Orientation::DEGENERATE
        && o2 != Orientation::DEGENERATE
        && o3 != Orientation::DEGENERATE
        && o4 != Orientation::DEGENERATE
        && o1 != o2
        && o3 != o4
}

fn face_keys(mesh: &Mesh<f64>) -> Vec<[VertexKey; 3]> {
    mesh.faces()
        .map(|(_, face)| {
            let v = face.vertices();
            [v[0], v[1], v[2]]
        })
        .collect()
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_empty_circumcircle(points in point_set(40)) {
        let dt = DelaunayTriangulation::new(&points).unwrap();
        prop_assert!(dt.validate_delaunay().is_ok());
        prop_assert!(find_delaunay_violations(dt.mesh(), None).unwrap().is_empty());
    }

    #[test]
    fn prop_faces_are_clockwise(points in point_set(40)) {
        let dt = DelaunayTriangulation::new(&points).unwrap();
        for [a, b, c] in dt.triangles() {
            prop_assert_eq!(orientation_2d(&a, &b, &c), Orientation::NEGATIVE);
        }
    }

    #[test]
    fn prop_edges_are_manifold(points in point_set(40)) {
        let dt = DelaunayTriangulation::new(&points).unwrap();

        let mut undirected: HashMap<Edge, usize> = HashMap::new();
        let mut directed: HashSet<(VertexKey, VertexKey)> = HashSet::new();
        for [a, b, c] in face_keys(dt.mesh()) {
            for (from, to) in [(a, b), (b, c), (c, a)] {
                *undirected.entry(Edge::new(from, to)).or_insert(0) += 1;
                prop_assert!(directed.insert((from, to)), "directed edge used twice");
            }
        }
        prop_assert!(undirected.values().all(|&count| count <= 2));
    }

    #[test]
    fn prop_no_dangling_super_triangle(points in point_set(40)) {
        let dt = DelaunayTriangulation::new(&points).unwrap();
        let mesh = dt.mesh();

        prop_assert_eq!(mesh.number_of_vertices(), points.len());
        for (key, p) in mesh.vertices() {
            prop_assert!(points.contains(p));
            prop_assert!(!mesh.is_vertex_deleted(key));
        }
        for [a, b, c] in face_keys(mesh) {
            prop_assert!(mesh.contains_vertex(a) && mesh.contains_vertex(b) && mesh.contains_vertex(c));
        }
        // Euler bound for a planar triangulation of n points.
        prop_assert!(dt.number_of_faces() <= 2 * points.len() - 5);
    }

    #[test]
    fn prop_planarity(points in point_set(25)) {
        let dt = DelaunayTriangulation::new(&points).unwrap();

        let mut edges: Vec<(Point<f64>, Point<f64>)> = Vec::new();
        for [a, b, c] in dt.triangles() {
            edges.extend([(a, b), (b, c), (c, a)]);
        }
        for (i, (a, b)) in edges.iter().enumerate() {
            for (c, d) in &edges[i + 1..] {
                prop_assert!(!segments_cross(a, b, c, d), "edges {a}-{b} and {c}-{d} cross");
            }
        }
    }

    #[test]
    fn prop_order_independence(points in point_set(30), seed in any::<u64>()) {
        use rand::SeedableRng;
        use rand::seq::SliceRandom;

        // Equal x values make the stable sort order-sensitive.
        let mut xs: Vec<u64> = points.iter().map(|p| p.x().to_bits()).collect();
        xs.sort_unstable();
        xs.dedup();
        prop_assume!(xs.len() == points.len());

        let mut shuffled = points.clone();
        shuffled.shuffle(&mut rand::rngs::StdRng::seed_from_u64(seed));

        let original: HashSet<_> = DelaunayTriangulation::new(&points)
            .unwrap()
            .triangles()
            .map(|t| triangle_id(&t))
            .collect();
        let permuted: HashSet<_> = DelaunayTriangulation::new(&shuffled)
            .unwrap()
            .triangles()
            .map(|t| triangle_id(&t))
            .collect();
        prop_assert_eq!(original, permuted);
    }
}
