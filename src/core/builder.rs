//! Construction configuration and a fluent builder for [`DelaunayTriangulation`].
//!
//! # When to use the builder
//!
//! | Situation | Recommended API |
//! |---|---|
//! | Default options | [`DelaunayTriangulation::new`] |
//! | Custom expansion or validation | [`DelaunayTriangulationBuilder`] |
//! | Reusable, serializable options | [`TriangulationConfig`] / [`TriangulationConfigBuilder`] |
//! | Caller-owned storage | [`DelaunayTriangulationBuilder::build_into`] |
//!
//! # Examples
//!
//! ```rust
//! use delaunay2d::core::builder::DelaunayTriangulationBuilder;
//! use delaunay2d::point;
//!
//! let points = vec![
//!     point!(0.0, 0.0),
//!     point!(1.0, 0.0),
//!     point!(0.0, 1.0),
//! ];
//!
//! let dt = DelaunayTriangulationBuilder::new(&points)
//!     .expansion(20.0)
//!     .validate(true)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(dt.number_of_vertices(), 3);
//! ```

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::core::algorithms::bowyer_watson::{
    DEFAULT_SUPER_TRIANGLE_EXPANSION, MIN_SUPER_TRIANGLE_EXPANSION,
};
use crate::core::delaunay_triangulation::{
    ConstructionStatistics, DelaunayTriangulation, TriangulationConstructionError,
    triangulate_into,
};
use crate::core::mesh::MeshStorage;
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Options for a Bowyer-Watson construction.
///
/// Missing fields take their defaults when deserializing.
///
/// # Examples
///
/// ```rust
/// use delaunay2d::core::builder::{TriangulationConfig, TriangulationConfigBuilder};
///
/// let config = TriangulationConfigBuilder::default()
///     .validate_delaunay(true)
///     .build()
///     .unwrap();
/// assert_eq!(config.super_triangle_expansion, 10.0);
///
/// // Rejected at build time.
/// assert!(TriangulationConfigBuilder::default()
///     .super_triangle_expansion(1.5)
///     .build()
///     .is_err());
///
/// let parsed: TriangulationConfig = serde_json::from_str(r#"{"validate_delaunay": true}"#).unwrap();
/// assert_eq!(parsed, config);
/// ```
#[derive(Builder, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[builder(build_fn(validate = "Self::validate"))]
#[serde(default)]
pub struct TriangulationConfig {
    /// Scale applied to the input bounding box to build the super-triangle.
    ///
    /// Must be finite and greater than 3.
    #[builder(default = "DEFAULT_SUPER_TRIANGLE_EXPANSION")]
    pub super_triangle_expansion: f64,
    /// Check the empty-circumcircle property after construction.
    #[builder(default)]
    pub validate_delaunay: bool,
}

impl Default for TriangulationConfig {
    fn default() -> Self {
        Self {
            super_triangle_expansion: DEFAULT_SUPER_TRIANGLE_EXPANSION,
            validate_delaunay: false,
        }
    }
}

impl TriangulationConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.super_triangle_expansion {
            Some(expansion)
                if !(expansion.is_finite() && expansion > MIN_SUPER_TRIANGLE_EXPANSION) =>
            {
                Err(format!(
                    "super_triangle_expansion must be finite and greater than {MIN_SUPER_TRIANGLE_EXPANSION}, got {expansion}"
                ))
            }
            _ => Ok(()),
        }
    }
}

// =============================================================================
// FLUENT BUILDER
// =============================================================================

/// Fluent front end over [`TriangulationConfig`] and the construction entry
/// points.
#[derive(Clone, Debug)]
pub struct DelaunayTriangulationBuilder<'a, T>
where
    T: CoordinateScalar,
{
    points: &'a [Point<T>],
    config: TriangulationConfig,
}

impl<'a, T> DelaunayTriangulationBuilder<'a, T>
where
    T: CoordinateScalar,
{
    /// Starts a builder over `points` with the default configuration.
    #[must_use]
    pub fn new(points: &'a [Point<T>]) -> Self {
        Self {
            points,
            config: TriangulationConfig::default(),
        }
    }

    /// Replaces the whole configuration.
    #[must_use]
    pub const fn config(mut self, config: TriangulationConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the super-triangle expansion factor.
    #[must_use]
    pub const fn expansion(mut self, expansion: f64) -> Self {
        self.config.super_triangle_expansion = expansion;
        self
    }

    /// Enables or disables Delaunay validation of the result.
    #[must_use]
    pub const fn validate(mut self, validate: bool) -> Self {
        self.config.validate_delaunay = validate;
        self
    }

    /// Builds an owned triangulation.
    ///
    /// # Errors
    ///
    /// See [`DelaunayTriangulation::with_config`].
    pub fn build(self) -> Result<DelaunayTriangulation<T>, TriangulationConstructionError> {
        DelaunayTriangulation::with_config(self.points, &self.config)
    }

    /// Triangulates into caller-provided storage.
    ///
    /// # Errors
    ///
    /// See [`triangulate_into`].
    pub fn build_into<S>(
        self,
        storage: &mut S,
    ) -> Result<ConstructionStatistics, TriangulationConstructionError>
    where
        S: MeshStorage<T> + ?Sized,
    {
        triangulate_into(self.points, storage, &self.config)
    }
}
