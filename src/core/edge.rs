//! Undirected edges between two vertices.
//!
//! An [`Edge`] identifies an edge purely by its two endpoint [`VertexKey`]s.
//! The endpoints are canonicalized at construction so that `(a, b)` and
//! `(b, a)` are the same value, which makes the derived `PartialEq`, `Hash`
//! and `Ord` agree with "same unordered pair of handles".
//!
//! ## Determinism
//!
//! `Edge` ordering follows the raw slotmap key representation, which is stable
//! within one mesh but carries no geometric meaning.

use crate::core::mesh::VertexKey;
use serde::{Deserialize, Serialize};
use slotmap::Key;

/// Undirected edge between two vertex keys.
///
/// # Examples
///
/// ```rust
/// use delaunay2d::core::edge::Edge;
/// use delaunay2d::core::mesh::{Mesh, MeshStorage};
/// use delaunay2d::point;
///
/// let mut mesh: Mesh<f64> = Mesh::new();
/// let a = mesh.add_point(point!(0.0, 0.0)).unwrap();
/// let b = mesh.add_point(point!(1.0, 0.0)).unwrap();
///
/// assert_eq!(Edge::new(a, b), Edge::new(b, a));
/// assert!(Edge::new(a, b).contains(a));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    v0: VertexKey,
    v1: VertexKey,
}

impl Edge {
    /// Creates a new edge.
    ///
    /// The endpoints are reordered so that `v0 <= v1` under the raw key order.
    /// A loop edge (`a == b`) is a caller error.
    #[must_use]
    pub fn new(a: VertexKey, b: VertexKey) -> Self {
        debug_assert_ne!(a, b, "an edge needs two distinct endpoints");

        let a_raw = a.data().as_ffi();
        let b_raw = b.data().as_ffi();

        if a_raw <= b_raw {
            Self { v0: a, v1: b }
        } else {
            Self { v0: b, v1: a }
        }
    }

    /// Returns the first (canonical) endpoint.
    #[inline]
    #[must_use]
    pub const fn v0(self) -> VertexKey {
        self.v0
    }

    /// Returns the second (canonical) endpoint.
    #[inline]
    #[must_use]
    pub const fn v1(self) -> VertexKey {
        self.v1
    }

    /// Returns the two endpoints as a tuple.
    #[inline]
    #[must_use]
    pub const fn endpoints(self) -> (VertexKey, VertexKey) {
        (self.v0, self.v1)
    }

    /// Returns `true` if `key` is one of the endpoints.
    #[inline]
    #[must_use]
    pub fn contains(self, key: VertexKey) -> bool {
        self.v0 == key || self.v1 == key
    }
}

impl From<(VertexKey, VertexKey)> for Edge {
    #[inline]
    fn from((a, b): (VertexKey, VertexKey)) -> Self {
        Self::new(a, b)
    }
}
