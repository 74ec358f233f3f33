//! Scalar requirements and validation for planar coordinates.
//!
//! Every geometric type in this crate is generic over a scalar `T` that implements
//! [`CoordinateScalar`]. The trait consolidates the bounds needed by the predicates
//! (`Float` arithmetic from `num-traits`), by storage (`Default`, `Debug`) and by
//! serialization (`serde`).
//!
//! # Examples
//!
//! ```rust
//! use delaunay2d::geometry::traits::coordinate::{CoordinateScalar, FiniteCheck};
//!
//! fn first_finite<T: CoordinateScalar>(values: &[T]) -> Option<T> {
//!     values.iter().copied().find(FiniteCheck::is_finite_value)
//! }
//!
//! assert!(1.5_f64.is_finite_value());
//! assert!(!f32::NAN.is_finite_value());
//! assert_eq!(first_finite(&[f64::NAN, 2.0]), Some(2.0));
//! ```

use num_traits::Float;
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;

/// Errors that can occur during coordinate validation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoordinateValidationError {
    /// A coordinate value is invalid (NaN or infinite).
    #[error("Invalid coordinate at index {coordinate_index}: {coordinate_value}")]
    InvalidCoordinate {
        /// Index of the invalid coordinate (0 = x, 1 = y, 2 = z).
        coordinate_index: usize,
        /// Value of the invalid coordinate, as a string.
        coordinate_value: String,
    },
}

// =============================================================================
// SUPPORTING TRAITS
// =============================================================================

/// Validation of scalar values: rejects NaN and infinity.
pub trait FiniteCheck {
    /// Returns `true` if the value is neither NaN nor infinite.
    fn is_finite_value(&self) -> bool;
}

macro_rules! impl_finite_check {
    ($($t:ty),*) => {
        $(
            impl FiniteCheck for $t {
                #[inline]
                fn is_finite_value(&self) -> bool {
                    self.is_finite()
                }
            }
        )*
    };
}

impl_finite_check!(f32, f64);

/// Trait alias for the scalar types usable as point coordinates.
///
/// Implemented for `f32` and `f64`.
pub trait CoordinateScalar:
    Float + FiniteCheck + Default + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

impl CoordinateScalar for f32 {}

impl CoordinateScalar for f64 {}
