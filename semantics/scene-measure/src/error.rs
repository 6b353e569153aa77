//! Error types for measurement operations.

use thiserror::Error;

/// Result type alias for measurement operations.
pub type MeasureResult<T> = Result<T, MeasureError>;

/// Errors that can occur during measurement operations.
#[derive(Debug, Error)]
pub enum MeasureError {
    /// Not enough points have been placed.
    #[error("insufficient points: need {required}, got {available}")]
    InsufficientPoints {
        /// Points required.
        required: usize,
        /// Points available.
        available: usize,
    },
}

impl MeasureError {
    /// Create an insufficient points error.
    #[must_use]
    pub const fn insufficient_points(required: usize, available: usize) -> Self {
        Self::InsufficientPoints {
            required,
            available,
        }
    }
}
