//! Triangles over mesh vertex keys.
//!
//! A [`Triangle`] is a value: three [`VertexKey`]s plus the three edges they
//! induce. It does not hold on to the storage it was built from; every
//! geometric operation takes a [`PointLookup`] and resolves coordinates on
//! demand.
//!
//! # Orientation
//!
//! [`Triangle::new`] normalizes the vertex order to counter-clockwise: when the
//! signed area of `(v1, v2, v3)` is not strictly positive, `v1` and `v3` are
//! swapped. The in-circle test relies on this ordering.
//!
//! # Equality
//!
//! Two triangles are equal iff they reference the same *set* of three
//! vertices; the stored order does not matter. `Hash` agrees with this.

use crate::core::edge::Edge;
use crate::core::mesh::{MeshError, PointLookup, VertexKey};
use crate::geometry::point::Point;
use crate::geometry::predicates::{
    InCircle, Orientation, in_circle, orientation_2d, signed_area_determinant,
};
use crate::geometry::traits::coordinate::CoordinateScalar;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Names one of the three corners of a [`Triangle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriangleCorner {
    /// The first stored vertex (`v1`).
    First,
    /// The second stored vertex (`v2`).
    Second,
    /// The third stored vertex (`v3`).
    Third,
}

impl TriangleCorner {
    /// All corners in storage order.
    pub const ALL: [Self; 3] = [Self::First, Self::Second, Self::Third];

    const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
            Self::Third => 2,
        }
    }
}

/// A counter-clockwise triangle over three vertex keys.
///
/// # Examples
///
/// ```rust
/// use delaunay2d::core::mesh::{Mesh, MeshStorage};
/// use delaunay2d::core::triangle::Triangle;
/// use delaunay2d::point;
///
/// let mut mesh: Mesh<f64> = Mesh::new();
/// let a = mesh.add_point(point!(0.0, 0.0)).unwrap();
/// let b = mesh.add_point(point!(0.0, 1.0)).unwrap();
/// let c = mesh.add_point(point!(1.0, 0.0)).unwrap();
///
/// // Supplied clockwise; stored counter-clockwise.
/// let t = Triangle::new(&mesh, a, b, c).unwrap();
/// assert!(t.is_ccw(&mesh).unwrap());
/// assert_eq!(t.vertices(), [c, b, a]);
/// ```
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Triangle {
    vertices: [VertexKey; 3],
    edges: [Edge; 3],
}

impl Triangle {
    /// Builds a triangle from three distinct vertices, normalizing the order
    /// to counter-clockwise.
    ///
    /// Passing repeated vertices is a caller error.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::VertexNotFound`] if any key cannot be resolved.
    pub fn new<T, L>(
        lookup: &L,
        v1: VertexKey,
        v2: VertexKey,
        v3: VertexKey,
    ) -> Result<Self, MeshError>
    where
        T: CoordinateScalar,
        L: PointLookup<T> + ?Sized,
    {
        debug_assert!(
            v1 != v2 && v2 != v3 && v1 != v3,
            "a triangle needs three distinct vertices"
        );

        let det = signed_area_determinant(
            &lookup.point_of(v1)?,
            &lookup.point_of(v2)?,
            &lookup.point_of(v3)?,
        );
        let [v1, v2, v3] = if det > T::zero() {
            [v1, v2, v3]
        } else {
            [v3, v2, v1]
        };

        Ok(Self {
            vertices: [v1, v2, v3],
            edges: [Edge::new(v1, v2), Edge::new(v2, v3), Edge::new(v3, v1)],
        })
    }

    /// The stored vertices `(v1, v2, v3)`.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [VertexKey; 3] {
        self.vertices
    }

    /// The vertex at `corner`.
    #[inline]
    #[must_use]
    pub const fn vertex(&self, corner: TriangleCorner) -> VertexKey {
        self.vertices[corner.index()]
    }

    /// The edges `(v1, v2)`, `(v2, v3)`, `(v3, v1)`, in that order.
    #[inline]
    #[must_use]
    pub const fn edges(&self) -> [Edge; 3] {
        self.edges
    }

    /// Returns `true` if `edge` is one of the triangle's edges.
    #[inline]
    #[must_use]
    pub fn find_edge(&self, edge: &Edge) -> bool {
        self.edges.iter().any(|e| e == edge)
    }

    /// Returns `true` if `key` is one of the triangle's vertices.
    #[inline]
    #[must_use]
    pub fn contains_vertex(&self, key: VertexKey) -> bool {
        self.vertices.contains(&key)
    }

    /// Resolves the coordinates of the vertex at `corner`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::VertexNotFound`] if the vertex is no longer stored.
    pub fn point<T, L>(&self, lookup: &L, corner: TriangleCorner) -> Result<Point<T>, MeshError>
    where
        T: CoordinateScalar,
        L: PointLookup<T> + ?Sized,
    {
        lookup.point_of(self.vertex(corner))
    }

    /// Resolves all three vertex coordinates in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::VertexNotFound`] if a vertex is no longer stored.
    pub fn points<T, L>(&self, lookup: &L) -> Result<[Point<T>; 3], MeshError>
    where
        T: CoordinateScalar,
        L: PointLookup<T> + ?Sized,
    {
        let [v1, v2, v3] = self.vertices;
        Ok([
            lookup.point_of(v1)?,
            lookup.point_of(v2)?,
            lookup.point_of(v3)?,
        ])
    }

    /// Orientation of the stored vertex order.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::VertexNotFound`] if a vertex is no longer stored.
    pub fn orientation<T, L>(&self, lookup: &L) -> Result<Orientation, MeshError>
    where
        T: CoordinateScalar,
        L: PointLookup<T> + ?Sized,
    {
        let [p1, p2, p3] = self.points(lookup)?;
        Ok(orientation_2d(&p1, &p2, &p3))
    }

    /// Returns `true` if the signed area of the stored order is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::VertexNotFound`] if a vertex is no longer stored.
    pub fn is_ccw<T, L>(&self, lookup: &L) -> Result<bool, MeshError>
    where
        T: CoordinateScalar,
        L: PointLookup<T> + ?Sized,
    {
        Ok(self.orientation(lookup)? == Orientation::POSITIVE)
    }

    /// Returns `true` if the stored vertex `candidate` lies strictly inside the
    /// circumcircle. Points exactly on the circle are not inside.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::VertexNotFound`] if any key cannot be resolved.
    pub fn circumcircles<T, L>(&self, lookup: &L, candidate: VertexKey) -> Result<bool, MeshError>
    where
        T: CoordinateScalar,
        L: PointLookup<T> + ?Sized,
    {
        let candidate = lookup.point_of(candidate)?;
        self.circumcircles_point(lookup, &candidate)
    }

    /// Same as [`circumcircles`](Self::circumcircles) for an arbitrary point.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::VertexNotFound`] if a vertex is no longer stored.
    pub fn circumcircles_point<T, L>(
        &self,
        lookup: &L,
        candidate: &Point<T>,
    ) -> Result<bool, MeshError>
    where
        T: CoordinateScalar,
        L: PointLookup<T> + ?Sized,
    {
        let [p1, p2, p3] = self.points(lookup)?;
        Ok(in_circle(&p1, &p2, &p3, candidate) == InCircle::INSIDE)
    }

    fn sorted_vertices(&self) -> [VertexKey; 3] {
        let mut sorted = self.vertices;
        sorted.sort_unstable();
        sorted
    }
}

impl PartialEq for Triangle {
    fn eq(&self, other: &Self) -> bool {
        self.sorted_vertices() == other.sorted_vertices()
    }
}

impl Eq for Triangle {}

impl Hash for Triangle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted_vertices().hash(state);
    }
}
