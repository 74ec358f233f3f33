//! Incremental Bowyer-Watson algorithm for planar Delaunay triangulation.
//!
//! # Algorithm Overview
//!
//! 1. **Bootstrap**: build one oversized *super-triangle* that contains every
//!    input point and seed the active triangle set with it.
//! 2. **Incremental insertion**: for each point, in ascending x order:
//!    - store the point and obtain its [`VertexKey`]
//!    - partition the active set into *bad* triangles (circumcircle strictly
//!      contains the point) and *kept* triangles
//!    - extract the cavity boundary: the edges owned by exactly one bad
//!      triangle
//!    - connect every boundary edge to the new vertex
//! 3. **Finalization**: drop every triangle that shares an edge with the
//!    super-triangle, commit the rest as mesh faces, delete the super-triangle
//!    vertices and compact storage (which also drops any committed face that
//!    still touches a super-triangle vertex).
//!
//! The active set is an owned `Vec<Triangle>` that is moved into and out of
//! each insertion; the bad and kept partitions never alias.
//!
//! # Degenerate input
//!
//! Predicates use plain floating-point arithmetic. Points exactly on a
//! circumcircle are treated as outside, duplicate points end up as isolated
//! vertices, and collinear input produces no faces. None of these raise an
//! error.
//!
//! # References
//!
//! - **Bowyer, A.** "Computing Dirichlet tessellations." *The Computer Journal* 24.2 (1981): 162-166.
//!   DOI: [10.1093/comjnl/24.2.162](https://doi.org/10.1093/comjnl/24.2.162)
//!
//! - **Watson, D.F.** "Computing the n-dimensional Delaunay tessellation with application to
//!   Voronoi polytopes." *The Computer Journal* 24.2 (1981): 167-172.
//!   DOI: [10.1093/comjnl/24.2.167](https://doi.org/10.1093/comjnl/24.2.167)
//!
//! - **de Berg, M., Cheong, O., van Kreveld, M., and Overmars, M.**
//!   *Computational Geometry: Algorithms and Applications.* 3rd ed. Springer-Verlag, 2008.
//!   Chapter 9: Delaunay Triangulations. ISBN: 978-3-540-77973-5

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::core::collections::{EdgeCountMap, fast_hash_map_with_capacity};
use crate::core::edge::Edge;
use crate::core::mesh::{MeshError, MeshStorage, PointLookup, VertexKey};
use crate::core::triangle::Triangle;
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;

/// Default scale applied to the input bounding box to build the super-triangle.
pub const DEFAULT_SUPER_TRIANGLE_EXPANSION: f64 = 10.0;

/// Smallest expansion for which the super-triangle is guaranteed to strictly
/// contain the bounding box. Valid expansions are strictly greater.
pub const MIN_SUPER_TRIANGLE_EXPANSION: f64 = 3.0;

// =============================================================================
// STATISTICS
// =============================================================================

/// Counters accumulated over the insertion loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionStatistics {
    /// Number of input points inserted.
    pub vertices_inserted: usize,
    /// Triangles created while re-triangulating cavities (excludes the super-triangle).
    pub triangles_created: usize,
    /// Bad triangles removed from the active set.
    pub triangles_removed: usize,
    /// Largest number of bad triangles seen in a single insertion.
    pub max_cavity_size: usize,
    /// Insertions whose point invalidated no triangle (duplicates).
    pub empty_cavities: usize,
}

impl InsertionStatistics {
    /// Creates zeroed statistics.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices_inserted: 0,
            triangles_created: 0,
            triangles_removed: 0,
            max_cavity_size: 0,
            empty_cavities: 0,
        }
    }

    fn record(&mut self, info: &InsertionInfo) {
        self.vertices_inserted += 1;
        self.triangles_created += info.triangles_created;
        self.triangles_removed += info.bad_triangles;
        self.max_cavity_size = self.max_cavity_size.max(info.bad_triangles);
        if info.bad_triangles == 0 {
            self.empty_cavities += 1;
        }
    }
}

/// Outcome of a single point insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InsertionInfo {
    /// The inserted vertex.
    pub vertex: VertexKey,
    /// Triangles whose circumcircle strictly contained the vertex.
    pub bad_triangles: usize,
    /// Edges on the boundary of the cavity.
    pub boundary_edges: usize,
    /// Triangles created to fill the cavity.
    pub triangles_created: usize,
}

/// Outcome of the finalization phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizationSummary {
    /// Triangles dropped because they share an edge with the super-triangle.
    pub removed_by_super_edge: usize,
    /// Faces committed to storage.
    pub faces_committed: usize,
    /// Committed faces removed again by compaction because they touch a
    /// super-triangle vertex. Faces removed for deletions queued before this
    /// run are not counted.
    pub faces_removed_by_compaction: usize,
}

impl FinalizationSummary {
    /// Faces left in storage by this triangulation.
    #[must_use]
    pub const fn faces_remaining(&self) -> usize {
        self.faces_committed
            .saturating_sub(self.faces_removed_by_compaction)
    }
}

// =============================================================================
// FREE FUNCTIONS
// =============================================================================

/// Sorts points ascending by x. The sort is stable, so points with equal x keep
/// their input order.
#[must_use]
pub fn sort_points_by_x<T: CoordinateScalar>(points: &[Point<T>]) -> Vec<Point<T>> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x().partial_cmp(&b.x()).unwrap_or(Ordering::Equal));
    sorted
}

/// Corner points `[A, B, C]` of the super-triangle for x-sorted `points`.
///
/// `min_x`/`max_x` come from the sorted extremes and `min_y`/`max_y` from a
/// scan. The bounding box is scaled by `expansion` about its center, and
/// - `A = (min_x', min_y')`
/// - `B = (max_x', min_y')`
/// - `C = ((min_x' + max_x') / 2, max_y')`
///
/// For a bounding box centered on the origin this is exactly
/// `A = (min_x·k, min_y·k)` and so on. A zero extent along one axis borrows the
/// other axis' extent (or 1 if both are zero) so the triangle never collapses.
///
/// Returns `None` for an empty slice.
///
/// # Examples
///
/// ```rust
/// use delaunay2d::core::algorithms::bowyer_watson::super_triangle_corners;
/// use delaunay2d::point;
///
/// let points = [point!(-2.0, 0.0), point!(0.0, -1.0), point!(0.0, 1.0), point!(2.0, 0.0)];
/// let [a, b, c] = super_triangle_corners(&points, 10.0).unwrap();
/// assert_eq!(a.xy(), [-20.0, -10.0]);
/// assert_eq!(b.xy(), [20.0, -10.0]);
/// assert_eq!(c.xy(), [0.0, 10.0]);
/// ```
#[must_use]
pub fn super_triangle_corners<T: CoordinateScalar>(
    sorted_points: &[Point<T>],
    expansion: T,
) -> Option<[Point<T>; 3]> {
    let first = sorted_points.first()?;
    let last = sorted_points.last()?;

    let (min_x, max_x) = (first.x(), last.x());
    let (min_y, max_y) = sorted_points
        .iter()
        .fold((first.y(), first.y()), |(lo, hi), p| {
            (lo.min(p.y()), hi.max(p.y()))
        });

    let two = T::one() + T::one();
    let center_x = (min_x + max_x) / two;
    let center_y = (min_y + max_y) / two;
    let half_width = (max_x - min_x) / two;
    let half_height = (max_y - min_y) / two;

    let fallback = |extent: T, other: T| {
        if extent > T::zero() {
            extent
        } else if other > T::zero() {
            other
        } else {
            T::one()
        }
    };
    let half_width_scaled = fallback(half_width, half_height) * expansion;
    let half_height_scaled = fallback(half_height, half_width) * expansion;

    let min_x = center_x - half_width_scaled;
    let max_x = center_x + half_width_scaled;
    let min_y = center_y - half_height_scaled;
    let max_y = center_y + half_height_scaled;

    Some([
        Point::new(min_x, min_y),
        Point::new(max_x, min_y),
        Point::new((min_x + max_x) / two, max_y),
    ])
}

/// Splits the active set into `(bad, kept)` for the vertex at `point`.
///
/// A triangle is bad iff `point` lies strictly inside its circumcircle.
///
/// # Errors
///
/// Returns [`MeshError::VertexNotFound`] if a triangle references a vertex
/// the lookup cannot resolve.
pub fn find_bad_triangles<T, L>(
    lookup: &L,
    triangles: Vec<Triangle>,
    point: &Point<T>,
) -> Result<(Vec<Triangle>, Vec<Triangle>), MeshError>
where
    T: CoordinateScalar,
    L: PointLookup<T> + ?Sized,
{
    let mut bad = Vec::new();
    let mut kept = Vec::with_capacity(triangles.len() + 2);
    for triangle in triangles {
        if triangle.circumcircles_point(lookup, point)? {
            bad.push(triangle);
        } else {
            kept.push(triangle);
        }
    }
    Ok((bad, kept))
}

/// Boundary of the cavity formed by `bad` triangles.
///
/// An edge is on the boundary iff exactly one bad triangle owns it; edges
/// shared by two bad triangles are interior to the cavity. Edges are returned
/// in order of first appearance (bad triangle order, then edge order).
///
/// # Examples
///
/// ```rust
/// use delaunay2d::core::algorithms::bowyer_watson::cavity_boundary;
/// use delaunay2d::core::edge::Edge;
/// use delaunay2d::core::mesh::{Mesh, MeshStorage};
/// use delaunay2d::core::triangle::Triangle;
/// use delaunay2d::point;
///
/// let mut mesh: Mesh<f64> = Mesh::new();
/// let [a, b, c, d] = [point!(0.0, 0.0), point!(1.0, 0.0), point!(1.0, 1.0), point!(0.0, 1.0)]
///     .map(|p| mesh.add_point(p).unwrap());
///
/// let bad = [
///     Triangle::new(&mesh, a, b, c).unwrap(),
///     Triangle::new(&mesh, a, c, d).unwrap(),
/// ];
/// let boundary = cavity_boundary(&bad);
/// assert_eq!(boundary.len(), 4);
/// assert!(!boundary.contains(&Edge::new(a, c)));
/// ```
#[must_use]
pub fn cavity_boundary(bad: &[Triangle]) -> Vec<Edge> {
    let mut owners: EdgeCountMap = fast_hash_map_with_capacity(bad.len() * 3);
    for edge in bad.iter().flat_map(Triangle::edges) {
        *owners.entry(edge).or_insert(0) += 1;
    }

    bad.iter()
        .flat_map(Triangle::edges)
        .filter(|edge| owners.get(edge) == Some(&1))
        .collect()
}

fn has_unique_vertex_sets(triangles: &[Triangle]) -> bool {
    let mut seen = crate::core::collections::fast_hash_set_with_capacity(triangles.len());
    triangles.iter().all(|t| seen.insert(*t))
}

// =============================================================================
// ENGINE
// =============================================================================

/// Incremental Bowyer-Watson engine.
///
/// Holds the super-triangle expansion and the statistics of the last run.
///
/// # Examples
///
/// ```rust
/// use delaunay2d::core::algorithms::bowyer_watson::BowyerWatson;
/// use delaunay2d::core::mesh::Mesh;
/// use delaunay2d::point;
///
/// let mut mesh: Mesh<f64> = Mesh::new();
/// let mut engine = BowyerWatson::new();
/// let points = [point!(0.0, 0.0), point!(1.0, 0.0), point!(0.0, 1.0)];
///
/// let summary = engine.triangulate(&mut mesh, &points).unwrap();
/// assert_eq!(summary.faces_remaining(), 1);
/// assert_eq!(engine.statistics().vertices_inserted, 3);
/// assert_eq!(mesh.number_of_vertices(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct BowyerWatson<T>
where
    T: CoordinateScalar,
{
    expansion: T,
    stats: InsertionStatistics,
    inserted: Vec<VertexKey>,
}

impl<T> Default for BowyerWatson<T>
where
    T: CoordinateScalar,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BowyerWatson<T>
where
    T: CoordinateScalar,
{
    /// Creates an engine with the default expansion (10).
    #[must_use]
    pub fn new() -> Self {
        let ten = (0..10).fold(T::zero(), |acc, _| acc + T::one());
        let expansion = num_traits::cast(DEFAULT_SUPER_TRIANGLE_EXPANSION).unwrap_or(ten);
        Self::with_expansion(expansion)
    }

    /// Creates an engine with a custom super-triangle expansion.
    ///
    /// Callers are expected to pass a finite value greater than
    /// [`MIN_SUPER_TRIANGLE_EXPANSION`]; the public constructors validate it.
    #[must_use]
    pub const fn with_expansion(expansion: T) -> Self {
        Self {
            expansion,
            stats: InsertionStatistics::new(),
            inserted: Vec::new(),
        }
    }

    /// The super-triangle expansion factor.
    #[must_use]
    pub const fn expansion(&self) -> T {
        self.expansion
    }

    /// Statistics of the insertion loop so far.
    #[must_use]
    pub const fn statistics(&self) -> &InsertionStatistics {
        &self.stats
    }

    /// Vertices inserted so far, in insertion (x-sorted) order.
    #[must_use]
    pub fn inserted_vertices(&self) -> &[VertexKey] {
        &self.inserted
    }

    /// Adds the super-triangle corners to `storage` and returns the
    /// super-triangle. The caller seeds the active set with it.
    ///
    /// # Errors
    ///
    /// Propagates storage failures. Returns [`MeshError::DegenerateFace`] for
    /// an empty point slice.
    pub fn bootstrap<S>(
        &self,
        storage: &mut S,
        sorted_points: &[Point<T>],
    ) -> Result<Triangle, MeshError>
    where
        S: MeshStorage<T> + ?Sized,
    {
        let [a, b, c] = super_triangle_corners(sorted_points, self.expansion).ok_or_else(|| {
            MeshError::DegenerateFace {
                message: "cannot bound an empty point set".to_string(),
            }
        })?;

        tracing::debug!(?a, ?b, ?c, expansion = ?self.expansion, "super-triangle");

        let v1 = storage.add_point(a)?;
        let v2 = storage.add_point(b)?;
        let v3 = storage.add_point(c)?;
        Triangle::new(&*storage, v1, v2, v3)
    }

    /// Inserts the stored vertex `vertex` into the active set.
    ///
    /// Consumes the current active set and returns the new one
    /// (`kept ∪ created`).
    ///
    /// # Errors
    ///
    /// Propagates [`MeshError`]s from point lookups.
    pub fn insert_vertex<L>(
        &mut self,
        lookup: &L,
        triangles: Vec<Triangle>,
        vertex: VertexKey,
    ) -> Result<(Vec<Triangle>, InsertionInfo), MeshError>
    where
        L: PointLookup<T> + ?Sized,
    {
        let point = lookup.point_of(vertex)?;
        let (bad, mut active) = find_bad_triangles(lookup, triangles, &point)?;
        debug_assert!(
            has_unique_vertex_sets(&bad),
            "two bad triangles share a vertex set"
        );

        let boundary = cavity_boundary(&bad);
        for edge in &boundary {
            let (a, b) = edge.endpoints();
            active.push(Triangle::new(lookup, a, b, vertex)?);
        }

        let info = InsertionInfo {
            vertex,
            bad_triangles: bad.len(),
            boundary_edges: boundary.len(),
            triangles_created: boundary.len(),
        };
        tracing::trace!(
            ?vertex,
            bad = info.bad_triangles,
            boundary = info.boundary_edges,
            active = active.len(),
            "inserted vertex"
        );

        self.stats.record(&info);
        self.inserted.push(vertex);
        Ok((active, info))
    }

    /// Commits the final triangles and removes the super-triangle.
    ///
    /// Triangles sharing an edge with `super_triangle` are dropped; the rest
    /// are committed as faces in `(v3, v2, v1)` order. The super-triangle
    /// vertices are then deleted and storage is compacted, which also removes
    /// any committed face that touches one of them.
    ///
    /// # Errors
    ///
    /// Propagates storage failures. Faces committed before a failure are not
    /// rolled back.
    pub fn finalize<S>(
        &self,
        storage: &mut S,
        triangles: Vec<Triangle>,
        super_triangle: &Triangle,
    ) -> Result<FinalizationSummary, MeshError>
    where
        S: MeshStorage<T> + ?Sized,
    {
        let total = triangles.len();
        let survivors: Vec<Triangle> = triangles
            .into_iter()
            .filter(|t| !t.edges().iter().any(|e| super_triangle.find_edge(e)))
            .collect();

        for triangle in &survivors {
            let [v1, v2, v3] = triangle.vertices();
            storage.add_face(&[v3, v2, v1])?;
        }

        // Only this run's faces can reference a super vertex, so these are
        // exactly the committed faces the compaction below removes.
        let faces_removed_by_compaction = survivors
            .iter()
            .filter(|t| {
                super_triangle
                    .vertices()
                    .iter()
                    .any(|&v| t.contains_vertex(v))
            })
            .count();

        storage.request_vertex_status();
        for vertex in super_triangle.vertices() {
            storage.delete_vertex(vertex)?;
        }
        let removed_total = storage.compact();
        if removed_total != faces_removed_by_compaction {
            tracing::debug!(
                removed_total,
                own = faces_removed_by_compaction,
                "compaction also removed faces queued before this run"
            );
        }

        let summary = FinalizationSummary {
            removed_by_super_edge: total - survivors.len(),
            faces_committed: survivors.len(),
            faces_removed_by_compaction,
        };
        tracing::debug!(?summary, "finalized triangulation");
        Ok(summary)
    }

    /// Runs the whole construction: sort, bootstrap, insert every point,
    /// finalize.
    ///
    /// The caller is responsible for the `points.len() >= 3` precondition.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub fn triangulate<S>(
        &mut self,
        storage: &mut S,
        points: &[Point<T>],
    ) -> Result<FinalizationSummary, MeshError>
    where
        S: MeshStorage<T> + ?Sized,
    {
        debug_assert!(points.len() >= 3, "triangulation needs at least 3 points");

        self.stats = InsertionStatistics::new();
        self.inserted.clear();
        self.inserted.reserve(points.len());

        let sorted = sort_points_by_x(points);
        let super_triangle = self.bootstrap(storage, &sorted)?;

        let mut active = vec![super_triangle];
        for point in &sorted {
            let vertex = storage.add_point(*point)?;
            let (next, _info) = self.insert_vertex(&*storage, active, vertex)?;
            active = next;
        }

        self.finalize(storage, active, &super_triangle)
    }
}
