//! Delaunay triangulation of a planar point set.
//!
//! [`DelaunayTriangulation`] runs the incremental Bowyer-Watson construction
//! into an owned [`Mesh`]. [`triangulate_into`] runs the same construction
//! into any caller-provided [`MeshStorage`].
//!
//! # Delaunay Property Note
//!
//! Predicates are evaluated in plain floating point. Inputs with exactly
//! cocircular, collinear or duplicated points are handled best-effort:
//! - cocircular ties count as "not inside"
//! - duplicate points are stored but referenced by no face
//! - purely collinear input yields no faces
//!
//! The super-triangle is a fixed multiple of the bounding box, not a
//! symbolic point at infinity. A super vertex can therefore lie inside the
//! circumcircle of a thin triangle along the convex hull, and such hull
//! triangles are dropped with the super-triangle. Every face that is
//! produced is Delaunay, but full coverage of the convex hull is not
//! guaranteed. A larger [`TriangulationConfig::super_triangle_expansion`]
//! makes gaps less likely.
//!
//! None of these is an error. Run
//! [`validate_delaunay`](DelaunayTriangulation::validate_delaunay), or set
//! [`TriangulationConfig::validate_delaunay`], to check the result.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::algorithms::bowyer_watson::{
    BowyerWatson, FinalizationSummary, InsertionStatistics, MIN_SUPER_TRIANGLE_EXPANSION,
};
use crate::core::builder::TriangulationConfig;
use crate::core::mesh::{Mesh, MeshError, MeshStorage};
use crate::core::util::delaunay_validation::{DelaunayValidationError, validate_delaunay};
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::{CoordinateScalar, CoordinateValidationError};

/// Minimum number of input points for a triangulation.
pub const MIN_VERTICES: usize = 3;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while constructing a triangulation.
///
/// Precondition failures ([`InsufficientVertices`](Self::InsufficientVertices),
/// [`InvalidCoordinate`](Self::InvalidCoordinate),
/// [`InvalidConfiguration`](Self::InvalidConfiguration)) are reported before
/// storage is touched.
///
/// # Examples
///
/// ```rust
/// use delaunay2d::prelude::*;
///
/// let err = DelaunayTriangulation::new(&[point!(0.0, 0.0), point!(1.0, 0.0)]).unwrap_err();
/// assert_eq!(err, TriangulationConstructionError::InsufficientVertices { found: 2 });
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TriangulationConstructionError {
    /// Fewer than three input points.
    #[error("Insufficient vertices: need at least 3, found {found}")]
    InsufficientVertices {
        /// Number of points supplied.
        found: usize,
    },
    /// An input point has a non-finite coordinate.
    #[error("Invalid coordinate in point {index}: {source}")]
    InvalidCoordinate {
        /// Position of the point in the input slice.
        index: usize,
        /// The underlying coordinate validation error.
        #[source]
        source: CoordinateValidationError,
    },
    /// The configuration cannot be used.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Description of the problem.
        message: String,
    },
    /// The storage collaborator failed.
    #[error("Mesh storage error: {0}")]
    Storage(#[from] MeshError),
    /// The finished mesh failed Delaunay validation.
    #[error("Validation error during construction: {0}")]
    ValidationFailed(#[from] DelaunayValidationError),
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Counters for one complete construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructionStatistics {
    /// Insertion loop counters.
    pub insertion: InsertionStatistics,
    /// Finalization counters.
    pub finalization: FinalizationSummary,
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

fn check_preconditions<T>(points: &[Point<T>]) -> Result<(), TriangulationConstructionError>
where
    T: CoordinateScalar,
{
    if points.len() < MIN_VERTICES {
        return Err(TriangulationConstructionError::InsufficientVertices {
            found: points.len(),
        });
    }
    for (index, point) in points.iter().enumerate() {
        point
            .validate()
            .map_err(|source| TriangulationConstructionError::InvalidCoordinate { index, source })?;
    }
    Ok(())
}

fn expansion_factor<T>(config: &TriangulationConfig) -> Result<T, TriangulationConstructionError>
where
    T: CoordinateScalar,
{
    let expansion = config.super_triangle_expansion;
    if !(expansion.is_finite() && expansion > MIN_SUPER_TRIANGLE_EXPANSION) {
        return Err(TriangulationConstructionError::InvalidConfiguration {
            message: format!(
                "super_triangle_expansion must be finite and greater than {MIN_SUPER_TRIANGLE_EXPANSION}, got {expansion}"
            ),
        });
    }
    num_traits::cast(expansion).ok_or_else(|| TriangulationConstructionError::InvalidConfiguration {
        message: format!("super_triangle_expansion {expansion} is not representable"),
    })
}

/// Triangulates `points` into a caller-provided storage.
///
/// The points are added to `storage` (plus three temporary super-triangle
/// vertices, which are deleted again), and every Delaunay triangle is
/// committed as a clockwise face. `config.validate_delaunay` is ignored here
/// because validation needs a concrete [`Mesh`]; use
/// [`DelaunayTriangulation::with_config`] for that.
///
/// # Errors
///
/// - [`TriangulationConstructionError::InsufficientVertices`] for fewer than 3 points
/// - [`TriangulationConstructionError::InvalidCoordinate`] for non-finite input
/// - [`TriangulationConstructionError::InvalidConfiguration`] for a bad expansion
///
/// These are reported before `storage` is modified. Storage failures during
/// the construction surface as [`TriangulationConstructionError::Storage`];
/// faces committed before the failure stay in storage.
///
/// # Examples
///
/// ```rust
/// use delaunay2d::prelude::*;
///
/// let mut mesh: Mesh<f64> = Mesh::new();
/// let points = [point!(0.0, 0.0), point!(1.0, 0.0), point!(0.0, 1.0)];
///
/// let stats = triangulate_into(&points, &mut mesh, &TriangulationConfig::default()).unwrap();
/// assert_eq!(stats.insertion.vertices_inserted, 3);
/// assert_eq!(mesh.number_of_faces(), 1);
/// ```
pub fn triangulate_into<T, S>(
    points: &[Point<T>],
    storage: &mut S,
    config: &TriangulationConfig,
) -> Result<ConstructionStatistics, TriangulationConstructionError>
where
    T: CoordinateScalar,
    S: MeshStorage<T> + ?Sized,
{
    check_preconditions(points)?;
    let expansion = expansion_factor::<T>(config)?;

    tracing::debug!(points = points.len(), ?expansion, "starting Bowyer-Watson construction");

    let mut engine = BowyerWatson::with_expansion(expansion);
    let finalization = engine.triangulate(storage, points)?;
    let statistics = ConstructionStatistics {
        insertion: *engine.statistics(),
        finalization,
    };

    tracing::debug!(
        faces = finalization.faces_remaining(),
        ?statistics,
        "finished Bowyer-Watson construction"
    );
    Ok(statistics)
}

// =============================================================================
// DELAUNAY TRIANGULATION
// =============================================================================

/// A planar Delaunay triangulation that owns its mesh.
///
/// # Examples
///
/// ```rust
/// use delaunay2d::prelude::*;
///
/// let points = vec![
///     point!(-2.0, 0.0),
///     point!(-1.0, 1.0),
///     point!(-1.0, -1.0),
///     point!(1.0, -1.0),
///     point!(1.0, 1.0),
///     point!(2.0, 0.0),
/// ];
///
/// let dt = DelaunayTriangulation::new(&points).unwrap();
/// assert_eq!(dt.number_of_vertices(), 6);
/// assert_eq!(dt.number_of_faces(), 4);
/// assert!(dt.validate_delaunay().is_ok());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: CoordinateScalar"))]
pub struct DelaunayTriangulation<T>
where
    T: CoordinateScalar,
{
    mesh: Mesh<T>,
    statistics: ConstructionStatistics,
}

impl<T> DelaunayTriangulation<T>
where
    T: CoordinateScalar,
{
    /// Triangulates `points` with the default configuration.
    ///
    /// # Errors
    ///
    /// See [`triangulate_into`].
    pub fn new(points: &[Point<T>]) -> Result<Self, TriangulationConstructionError> {
        Self::with_config(points, &TriangulationConfig::default())
    }

    /// Triangulates `points` with a custom configuration.
    ///
    /// # Errors
    ///
    /// See [`triangulate_into`]. Additionally returns
    /// [`TriangulationConstructionError::ValidationFailed`] when
    /// `config.validate_delaunay` is set and the result has a violation.
    pub fn with_config(
        points: &[Point<T>],
        config: &TriangulationConfig,
    ) -> Result<Self, TriangulationConstructionError> {
        let mut mesh = Mesh::with_capacity(points.len() + 3, 2 * points.len() + 1);
        let statistics = triangulate_into(points, &mut mesh, config)?;
        if config.validate_delaunay {
            validate_delaunay(&mesh)?;
        }
        Ok(Self { mesh, statistics })
    }

    /// The underlying mesh.
    #[must_use]
    pub const fn mesh(&self) -> &Mesh<T> {
        &self.mesh
    }

    /// Consumes the triangulation and returns its mesh.
    #[must_use]
    pub fn into_mesh(self) -> Mesh<T> {
        self.mesh
    }

    /// Number of vertices, including duplicates that no face references.
    #[must_use]
    pub fn number_of_vertices(&self) -> usize {
        self.mesh.number_of_vertices()
    }

    /// Number of triangular faces.
    #[must_use]
    pub fn number_of_faces(&self) -> usize {
        self.mesh.number_of_faces()
    }

    /// Construction counters.
    #[must_use]
    pub const fn statistics(&self) -> &ConstructionStatistics {
        &self.statistics
    }

    /// Iterates over the faces as point triples, in stored (clockwise) order.
    pub fn triangles(&self) -> impl Iterator<Item = [Point<T>; 3]> + '_ {
        self.mesh.faces().filter_map(|(_, face)| {
            let &[a, b, c] = face.vertices() else {
                return None;
            };
            Some([
                *self.mesh.vertex(a)?,
                *self.mesh.vertex(b)?,
                *self.mesh.vertex(c)?,
            ])
        })
    }

    /// Checks the empty-circumcircle property of every face.
    ///
    /// # Errors
    ///
    /// Returns [`DelaunayValidationError::DelaunayViolation`] for the first
    /// face whose circumcircle strictly contains another vertex.
    pub fn validate_delaunay(&self) -> Result<(), DelaunayValidationError> {
        validate_delaunay(&self.mesh)
    }
}
