//! Geometric utility functions.
//!
//! Currently this hosts point-set generation used by the test suite and the
//! benchmarks.

pub mod point_generation;

pub use point_generation::*;

/// Errors that can occur during random point generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum RandomPointGenerationError {
    /// Invalid coordinate range provided.
    #[error("Invalid coordinate range: minimum {min} must be less than maximum {max}")]
    InvalidRange {
        /// The minimum value of the range.
        min: String,
        /// The maximum value of the range.
        max: String,
    },
    /// Invalid grid parameters.
    #[error("Invalid grid parameters: {details}")]
    InvalidGrid {
        /// Description of what is wrong with the grid request.
        details: String,
    },
}
