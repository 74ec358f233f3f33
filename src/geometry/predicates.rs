//! Planar geometric predicates.
//!
//! Both predicates are evaluated with ordinary floating-point arithmetic. There
//! is no adaptive or exact fallback: results for (nearly) collinear or
//! cocircular configurations follow whatever sign the rounded determinant has,
//! and an exact zero is reported as [`Orientation::DEGENERATE`] /
//! [`InCircle::BOUNDARY`].
//!
//! Only the `x` and `y` coordinates are read.

use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;

/// Represents the position of a point relative to a circumcircle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InCircle {
    /// The point is outside the circumcircle
    OUTSIDE,
    /// The point lies exactly on the circumcircle
    BOUNDARY,
    /// The point is strictly inside the circumcircle
    INSIDE,
}

impl std::fmt::Display for InCircle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OUTSIDE => write!(f, "OUTSIDE"),
            Self::BOUNDARY => write!(f, "BOUNDARY"),
            Self::INSIDE => write!(f, "INSIDE"),
        }
    }
}

/// Represents the orientation of a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Clockwise (determinant < 0)
    NEGATIVE,
    /// Collinear (determinant == 0)
    DEGENERATE,
    /// Counter-clockwise (determinant > 0)
    POSITIVE,
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NEGATIVE => write!(f, "NEGATIVE"),
            Self::DEGENERATE => write!(f, "DEGENERATE"),
            Self::POSITIVE => write!(f, "POSITIVE"),
        }
    }
}

#[inline]
fn det2<T: CoordinateScalar>(a: T, b: T, c: T, d: T) -> T {
    a * d - b * c
}

/// Twice the signed area of the triangle `(p1, p2, p3)`.
///
/// Computed as the 2×2 determinant of `(p1 - p3, p2 - p3)`:
///
/// ```text
/// | x₁-x₃  y₁-y₃ |
/// | x₂-x₃  y₂-y₃ |
/// ```
///
/// Positive for counter-clockwise order.
///
/// # Examples
///
/// ```rust
/// use delaunay2d::geometry::predicates::signed_area_determinant;
/// use delaunay2d::point;
///
/// let det = signed_area_determinant(&point!(0.0, 0.0), &point!(1.0, 0.0), &point!(0.0, 1.0));
/// assert_eq!(det, 1.0);
/// ```
#[inline]
#[must_use]
pub fn signed_area_determinant<T: CoordinateScalar>(
    p1: &Point<T>,
    p2: &Point<T>,
    p3: &Point<T>,
) -> T {
    det2(
        p1.x() - p3.x(),
        p1.y() - p3.y(),
        p2.x() - p3.x(),
        p2.y() - p3.y(),
    )
}

/// Orientation of the triangle `(p1, p2, p3)`.
///
/// # Examples
///
/// ```rust
/// use delaunay2d::geometry::predicates::{Orientation, orientation_2d};
/// use delaunay2d::point;
///
/// let a = point!(0.0, 0.0);
/// let b = point!(1.0, 0.0);
/// let c = point!(0.0, 1.0);
/// assert_eq!(orientation_2d(&a, &b, &c), Orientation::POSITIVE);
/// assert_eq!(orientation_2d(&a, &c, &b), Orientation::NEGATIVE);
/// assert_eq!(orientation_2d(&a, &b, &point!(2.0, 0.0)), Orientation::DEGENERATE);
/// ```
#[must_use]
pub fn orientation_2d<T: CoordinateScalar>(
    p1: &Point<T>,
    p2: &Point<T>,
    p3: &Point<T>,
) -> Orientation {
    let det = signed_area_determinant(p1, p2, p3);
    if det > T::zero() {
        Orientation::POSITIVE
    } else if det < T::zero() {
        Orientation::NEGATIVE
    } else {
        Orientation::DEGENERATE
    }
}

/// In-circle determinant of `candidate` against the triangle `(p1, p2, p3)`.
///
/// The triangle is translated into a frame centered on the candidate and the
/// determinant of
///
/// ```text
/// | dx₁  dy₁  dx₁²+dy₁² |
/// | dx₂  dy₂  dx₂²+dy₂² |
/// | dx₃  dy₃  dx₃²+dy₃² |
/// ```
///
/// is returned. For a counter-clockwise triangle the value is positive iff the
/// candidate lies strictly inside the circumcircle; a clockwise triangle flips
/// the sign.
#[must_use]
pub fn incircle_determinant<T: CoordinateScalar>(
    p1: &Point<T>,
    p2: &Point<T>,
    p3: &Point<T>,
    candidate: &Point<T>,
) -> T {
    let (ax, ay) = (p1.x() - candidate.x(), p1.y() - candidate.y());
    let (bx, by) = (p2.x() - candidate.x(), p2.y() - candidate.y());
    let (cx, cy) = (p3.x() - candidate.x(), p3.y() - candidate.y());

    let a_lift = ax * ax + ay * ay;
    let b_lift = bx * bx + by * by;
    let c_lift = cx * cx + cy * cy;

    ax * det2(by, cy, b_lift, c_lift) - ay * det2(bx, cx, b_lift, c_lift)
        + a_lift * det2(bx, cx, by, cy)
}

/// Classifies `candidate` against the circumcircle of the counter-clockwise
/// triangle `(p1, p2, p3)`.
///
/// An exactly zero determinant is reported as [`InCircle::BOUNDARY`]; callers
/// that need a strict "inside" test should compare against
/// [`InCircle::INSIDE`] only.
///
/// # Examples
///
/// ```rust
/// use delaunay2d::geometry::predicates::{InCircle, in_circle};
/// use delaunay2d::point;
///
/// let a = point!(0.0, 0.0);
/// let b = point!(2.0, 0.0);
/// let c = point!(0.0, 2.0);
///
/// assert_eq!(in_circle(&a, &b, &c, &point!(1.0, 1.0)), InCircle::INSIDE);
/// assert_eq!(in_circle(&a, &b, &c, &point!(2.0, 2.0)), InCircle::BOUNDARY);
/// assert_eq!(in_circle(&a, &b, &c, &point!(5.0, 5.0)), InCircle::OUTSIDE);
/// ```
#[must_use]
pub fn in_circle<T: CoordinateScalar>(
    p1: &Point<T>,
    p2: &Point<T>,
    p3: &Point<T>,
    candidate: &Point<T>,
) -> InCircle {
    let det = incircle_determinant(p1, p2, p3, candidate);
    if det > T::zero() {
        InCircle::INSIDE
    } else if det < T::zero() {
        InCircle::OUTSIDE
    } else {
        InCircle::BOUNDARY
    }
}
