//! Planar points with an optional, carried-along third coordinate.
//!
//! A [`Point`] stores `x`, `y` and `z`. Only `x` and `y` take part in any
//! predicate; `z` is carried so that points round-trip through a mesh
//! unchanged (it defaults to zero).
//!
//! Points are immutable once created: the coordinates are private and only
//! exposed through accessors.

#![forbid(unsafe_code)]

use crate::geometry::traits::coordinate::{CoordinateScalar, CoordinateValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Convenience macro for creating points.
///
/// # Examples
///
/// ```rust
/// use delaunay2d::point;
///
/// let p = point!(1.0, 2.0);
/// assert_eq!(p.x(), 1.0);
/// assert_eq!(p.z(), 0.0);
///
/// let q = point!(1.0, 2.0, 5.0);
/// assert_eq!(q.z(), 5.0);
/// ```
#[macro_export]
macro_rules! point {
    ($x:expr, $y:expr $(,)?) => {
        $crate::geometry::point::Point::new($x, $y)
    };
    ($x:expr, $y:expr, $z:expr $(,)?) => {
        $crate::geometry::point::Point::with_z($x, $y, $z)
    };
}

// Re-export the macro at module level for convenience
pub use crate::point;

// =============================================================================
// POINT STRUCT DEFINITION
// =============================================================================

/// A point in the plane, generic over the coordinate scalar `T`.
///
/// # Examples
///
/// ```rust
/// use delaunay2d::geometry::point::Point;
///
/// let p = Point::new(1.0_f64, -2.0);
/// assert_eq!(p.xy(), [1.0, -2.0]);
/// assert_eq!(p.coords(), &[1.0, -2.0, 0.0]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point<T> {
    /// The coordinates `[x, y, z]`.
    coords: [T; 3],
}

impl<T> Point<T>
where
    T: CoordinateScalar,
{
    /// Creates a planar point with `z = 0`.
    #[inline]
    #[must_use]
    pub fn new(x: T, y: T) -> Self {
        Self {
            coords: [x, y, T::zero()],
        }
    }

    /// Creates a point that carries a third coordinate.
    ///
    /// The third coordinate is ignored by every predicate in this crate.
    #[inline]
    #[must_use]
    pub const fn with_z(x: T, y: T, z: T) -> Self {
        Self { coords: [x, y, z] }
    }

    /// The x coordinate.
    #[inline]
    #[must_use]
    pub const fn x(&self) -> T {
        self.coords[0]
    }

    /// The y coordinate.
    #[inline]
    #[must_use]
    pub const fn y(&self) -> T {
        self.coords[1]
    }

    /// The carried third coordinate.
    #[inline]
    #[must_use]
    pub const fn z(&self) -> T {
        self.coords[2]
    }

    /// Returns a reference to all three stored coordinates.
    #[inline]
    #[must_use]
    pub const fn coords(&self) -> &[T; 3] {
        &self.coords
    }

    /// Returns the planar part `[x, y]`.
    #[inline]
    #[must_use]
    pub const fn xy(&self) -> [T; 2] {
        [self.coords[0], self.coords[1]]
    }

    /// Checks that every coordinate is finite.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateValidationError::InvalidCoordinate`] for the first
    /// NaN or infinite coordinate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use delaunay2d::geometry::point::Point;
    ///
    /// assert!(Point::new(1.0, 2.0).validate().is_ok());
    /// assert!(Point::new(f64::NAN, 2.0).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), CoordinateValidationError> {
        for (coordinate_index, value) in self.coords.iter().enumerate() {
            if !value.is_finite_value() {
                return Err(CoordinateValidationError::InvalidCoordinate {
                    coordinate_index,
                    coordinate_value: format!("{value:?}"),
                });
            }
        }
        Ok(())
    }
}

impl<T> Default for Point<T>
where
    T: CoordinateScalar,
{
    fn default() -> Self {
        Self::new(T::zero(), T::zero())
    }
}

impl<T> From<[T; 2]> for Point<T>
where
    T: CoordinateScalar,
{
    #[inline]
    fn from([x, y]: [T; 2]) -> Self {
        Self::new(x, y)
    }
}

impl<T> From<[T; 3]> for Point<T>
where
    T: CoordinateScalar,
{
    #[inline]
    fn from(coords: [T; 3]) -> Self {
        Self { coords }
    }
}

impl<T> From<Point<T>> for [T; 3]
where
    T: CoordinateScalar,
{
    #[inline]
    fn from(point: Point<T>) -> Self {
        point.coords
    }
}

impl<T> fmt::Display for Point<T>
where
    T: CoordinateScalar + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn point_macro_forms() {
        let p: Point<f64> = point!(1.5, -2.0);
        assert_relative_eq!(p.x(), 1.5);
        assert_relative_eq!(p.y(), -2.0);
        assert_relative_eq!(p.z(), 0.0);

        let q: Point<f32> = point!(1.0, 2.0, 3.0);
        assert_eq!(q.coords(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn point_conversions() {
        let p = Point::from([3.0, 4.0]);
        assert_eq!(p.xy(), [3.0, 4.0]);

        let q = Point::from([3.0, 4.0, 5.0]);
        let raw: [f64; 3] = q.into();
        assert_eq!(raw, [3.0, 4.0, 5.0]);
    }

    #[test]
    fn point_validate_reports_first_bad_coordinate() {
        let p = Point::with_z(1.0, f64::INFINITY, f64::NAN);
        let err = p.validate().unwrap_err();
        assert_eq!(
            err,
            CoordinateValidationError::InvalidCoordinate {
                coordinate_index: 1,
                coordinate_value: "inf".to_string(),
            }
        );
    }

    #[test]
    fn point_serialization_roundtrip() {
        let p = Point::with_z(1.25, -3.5, 0.5);
        let json = serde_json::to_string(&p).unwrap();
        let back: Point<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn point_display_is_planar() {
        assert_eq!(Point::with_z(1.0, 2.0, 9.0).to_string(), "(1, 2)");
    }
}
