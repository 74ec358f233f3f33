//! Mesh storage: the collaborator that owns point coordinates and faces.
//!
//! The triangulation core never owns point memory. It talks to storage
//! through two small traits:
//!
//! - [`PointLookup`]: read-only `point_of(key)`.
//! - [`MeshStorage`]: `add_point`, `add_face`, deferred `delete_vertex`
//!   (after [`request_vertex_status`](MeshStorage::request_vertex_status)),
//!   and `compact`.
//!
//! [`Mesh`] is the in-crate implementation: an index-addressed arena of points
//! and a face list, both slotmaps keyed by [`VertexKey`] / [`FaceKey`].
//! Deleting a vertex only marks it; [`compact`](MeshStorage::compact)
//! removes marked vertices together with every face that references one.
//!
//! # Examples
//!
//! ```rust
//! use delaunay2d::core::mesh::{Mesh, MeshStorage};
//! use delaunay2d::point;
//!
//! let mut mesh: Mesh<f64> = Mesh::new();
//! let a = mesh.add_point(point!(0.0, 0.0)).unwrap();
//! let b = mesh.add_point(point!(1.0, 0.0)).unwrap();
//! let c = mesh.add_point(point!(0.0, 1.0)).unwrap();
//! mesh.add_face(&[a, b, c]).unwrap();
//!
//! mesh.request_vertex_status();
//! mesh.delete_vertex(c).unwrap();
//! assert_eq!(mesh.number_of_vertices(), 3); // deletion is deferred
//!
//! assert_eq!(mesh.compact(), 1); // the face touching `c` goes too
//! assert_eq!(mesh.number_of_vertices(), 2);
//! assert_eq!(mesh.number_of_faces(), 0);
//! ```

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use thiserror::Error;

use crate::core::collections::{FaceVertexBuffer, SmallBuffer, StorageMap, VertexKeySet};
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;

// =============================================================================
// KEYS
// =============================================================================

new_key_type! {
    /// Key type for accessing vertices in mesh storage.
    ///
    /// Keys stay valid while other vertices are added or removed.
    pub struct VertexKey;
}

new_key_type! {
    /// Key type for accessing faces in mesh storage.
    pub struct FaceKey;
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors reported by mesh storage.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    /// The key does not refer to a stored vertex.
    #[error("Vertex {key:?} not found in mesh storage")]
    VertexNotFound {
        /// The unknown key.
        key: VertexKey,
    },
    /// The vertex is marked for deletion and cannot take part in new faces.
    #[error("Vertex {key:?} is marked for deletion")]
    VertexDeleted {
        /// The marked key.
        key: VertexKey,
    },
    /// A face with fewer than three vertices or a repeated vertex.
    #[error("Degenerate face: {message}")]
    DegenerateFace {
        /// Description of the problem.
        message: String,
    },
    /// A vertex deletion was attempted before status tracking was requested.
    #[error(
        "Cannot delete vertex {key:?}: vertex status tracking has not been requested"
    )]
    StatusTrackingDisabled {
        /// The vertex whose deletion was refused.
        key: VertexKey,
    },
}

// =============================================================================
// TRAITS
// =============================================================================

/// Read-only point lookup by vertex key.
pub trait PointLookup<T>
where
    T: CoordinateScalar,
{
    /// Returns the coordinates stored for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::VertexNotFound`] if `key` is not stored.
    fn point_of(&self, key: VertexKey) -> Result<Point<T>, MeshError>;
}

/// Mutable mesh storage consumed by the triangulation core.
pub trait MeshStorage<T>: PointLookup<T>
where
    T: CoordinateScalar,
{
    /// Stores a point and returns its key.
    ///
    /// # Errors
    ///
    /// Implementations may refuse the point; [`Mesh`] never does.
    fn add_point(&mut self, point: Point<T>) -> Result<VertexKey, MeshError>;

    /// Creates a polygonal face with the given winding order.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::VertexNotFound`] / [`MeshError::VertexDeleted`]
    /// for keys that are not usable, and [`MeshError::DegenerateFace`] for
    /// fewer than three vertices or repeated vertices.
    fn add_face(&mut self, vertices: &[VertexKey]) -> Result<FaceKey, MeshError>;

    /// Enables vertex status tracking, which deferred deletion requires.
    fn request_vertex_status(&mut self);

    /// Marks a vertex for deletion. Nothing is removed until [`compact`](Self::compact).
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::StatusTrackingDisabled`] if
    /// [`request_vertex_status`](Self::request_vertex_status) was not called
    /// first, or [`MeshError::VertexNotFound`] for an unknown key.
    fn delete_vertex(&mut self, key: VertexKey) -> Result<(), MeshError>;

    /// Physically removes all marked vertices and every face that references
    /// one of them. Returns the number of faces removed.
    fn compact(&mut self) -> usize;
}

// =============================================================================
// FACE
// =============================================================================

/// A polygonal face: vertex keys in winding order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    vertices: FaceVertexBuffer,
}

impl Face {
    /// The face's vertices in winding order.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[VertexKey] {
        &self.vertices
    }

    /// Number of vertices of the face.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always `false` for faces created through [`MeshStorage::add_face`].
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns `true` if `key` is one of the face's vertices.
    #[inline]
    #[must_use]
    pub fn contains_vertex(&self, key: VertexKey) -> bool {
        self.vertices.contains(&key)
    }
}

// =============================================================================
// MESH
// =============================================================================

/// Index-addressed mesh storage: a point arena and a face list.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: CoordinateScalar"))]
pub struct Mesh<T>
where
    T: CoordinateScalar,
{
    vertices: StorageMap<VertexKey, Point<T>>,
    faces: StorageMap<FaceKey, Face>,
    pending_deletion: VertexKeySet,
    vertex_status: bool,
}

impl<T> Default for Mesh<T>
where
    T: CoordinateScalar,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Mesh<T>
where
    T: CoordinateScalar,
{
    /// Creates an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vertices: StorageMap::with_key(),
            faces: StorageMap::with_key(),
            pending_deletion: VertexKeySet::default(),
            vertex_status: false,
        }
    }

    /// Creates an empty mesh with room for `vertices` points and `faces` faces.
    #[must_use]
    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            vertices: StorageMap::with_capacity_and_key(vertices),
            faces: StorageMap::with_capacity_and_key(faces),
            pending_deletion: VertexKeySet::default(),
            vertex_status: false,
        }
    }

    /// Number of stored vertices, including ones marked for deletion.
    #[must_use]
    pub fn number_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of stored faces.
    #[must_use]
    pub fn number_of_faces(&self) -> usize {
        self.faces.len()
    }

    /// Iterates over `(key, point)` pairs.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexKey, &Point<T>)> {
        self.vertices.iter()
    }

    /// Iterates over `(key, face)` pairs.
    pub fn faces(&self) -> impl Iterator<Item = (FaceKey, &Face)> {
        self.faces.iter()
    }

    /// Returns the point stored for `key`, if any.
    #[must_use]
    pub fn vertex(&self, key: VertexKey) -> Option<&Point<T>> {
        self.vertices.get(key)
    }

    /// Returns the face stored for `key`, if any.
    #[must_use]
    pub fn face(&self, key: FaceKey) -> Option<&Face> {
        self.faces.get(key)
    }

    /// Returns `true` if `key` refers to a stored vertex.
    #[must_use]
    pub fn contains_vertex(&self, key: VertexKey) -> bool {
        self.vertices.contains_key(key)
    }

    /// Returns `true` if `key` is marked for deletion but not yet compacted.
    #[must_use]
    pub fn is_vertex_deleted(&self, key: VertexKey) -> bool {
        self.pending_deletion.contains(&key)
    }

    /// Returns `true` once [`MeshStorage::request_vertex_status`] has been called.
    #[must_use]
    pub const fn has_vertex_status(&self) -> bool {
        self.vertex_status
    }

    /// Resolves the points of a face, in winding order.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::VertexNotFound`] if the face references a vertex
    /// that is no longer stored.
    pub fn face_points(&self, face: &Face) -> Result<SmallBuffer<Point<T>, 4>, MeshError> {
        face.vertices().iter().map(|&key| self.point_of(key)).collect()
    }

    /// Returns `true` if no face references `key`.
    #[must_use]
    pub fn is_isolated(&self, key: VertexKey) -> bool {
        !self.faces.values().any(|face| face.contains_vertex(key))
    }
}

impl<T> PointLookup<T> for Mesh<T>
where
    T: CoordinateScalar,
{
    #[inline]
    fn point_of(&self, key: VertexKey) -> Result<Point<T>, MeshError> {
        self.vertices
            .get(key)
            .copied()
            .ok_or(MeshError::VertexNotFound { key })
    }
}

impl<T> MeshStorage<T> for Mesh<T>
where
    T: CoordinateScalar,
{
    fn add_point(&mut self, point: Point<T>) -> Result<VertexKey, MeshError> {
        Ok(self.vertices.insert(point))
    }

    fn add_face(&mut self, vertices: &[VertexKey]) -> Result<FaceKey, MeshError> {
        if vertices.len() < 3 {
            return Err(MeshError::DegenerateFace {
                message: format!("expected at least 3 vertices, got {}", vertices.len()),
            });
        }

        let mut face = FaceVertexBuffer::with_capacity(vertices.len());
        for &key in vertices {
            if !self.vertices.contains_key(key) {
                return Err(MeshError::VertexNotFound { key });
            }
            if self.pending_deletion.contains(&key) {
                return Err(MeshError::VertexDeleted { key });
            }
            if face.contains(&key) {
                return Err(MeshError::DegenerateFace {
                    message: format!("vertex {key:?} appears more than once"),
                });
            }
            face.push(key);
        }

        Ok(self.faces.insert(Face { vertices: face }))
    }

    fn request_vertex_status(&mut self) {
        self.vertex_status = true;
    }

    fn delete_vertex(&mut self, key: VertexKey) -> Result<(), MeshError> {
        if !self.vertex_status {
            return Err(MeshError::StatusTrackingDisabled { key });
        }
        if !self.vertices.contains_key(key) {
            return Err(MeshError::VertexNotFound { key });
        }
        self.pending_deletion.insert(key);
        Ok(())
    }

    fn compact(&mut self) -> usize {
        if self.pending_deletion.is_empty() {
            return 0;
        }

        let pending = std::mem::take(&mut self.pending_deletion);
        let faces_before = self.faces.len();
        self.faces
            .retain(|_, face| !face.vertices().iter().any(|key| pending.contains(key)));
        for key in &pending {
            self.vertices.remove(*key);
        }

        let removed_faces = faces_before - self.faces.len();
        tracing::debug!(
            removed_vertices = pending.len(),
            removed_faces,
            "compacted mesh storage"
        );
        removed_faces
    }
}
