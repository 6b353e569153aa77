//! Error types for the scene-query crate.
//!
//! A lookup that finds nothing is not an error; it resolves to
//! [`QueryResult::NotFound`](crate::QueryResult::NotFound). Errors here cover
//! configuration and result delivery only.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when configuring or awaiting a query.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QueryError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The worker dropped its end of the channel without delivering.
    #[error("query worker disconnected before delivering a result")]
    Disconnected,

    /// No result arrived within the allotted time.
    #[error("query result not ready after {0:?}")]
    Timeout(Duration),
}

impl QueryError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }

    /// Creates a timeout error.
    #[must_use]
    pub const fn timeout(waited: Duration) -> Self {
        Self::Timeout(waited)
    }
}

/// Result type for scene-query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
