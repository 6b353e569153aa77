//! Configuration for classified face lookups.
//!
//! [`QueryConfig`] holds the two distance thresholds that bound a lookup:
//!
//! - `cutoff_distance` - fragments whose origin lies farther than this from
//!   the query point are skipped without looking at their faces
//! - `match_radius` - the first face whose world-space centroid lies within
//!   this distance of the query point is the answer
//!
//! # Presets
//!
//! - [`QueryConfig::default()`] - 4 m cutoff, 5 cm match radius
//! - [`QueryConfig::precise()`] - tighter thresholds for small rooms
//! - [`QueryConfig::coarse()`] - looser thresholds for sparse reconstructions
//!
//! # Example
//!
//! ```
//! use scene_query::QueryConfig;
//!
//! let config = QueryConfig::default()
//!     .with_cutoff_distance(2.5)
//!     .with_match_radius(0.03);
//! assert!(config.validate().is_ok());
//!
//! let bad = QueryConfig::default().with_match_radius(-1.0);
//! assert!(bad.validate().is_err());
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};

/// Default fragment-level pruning radius.
pub const DEFAULT_CUTOFF_DISTANCE: f64 = 4.0;

/// Default per-face acceptance radius.
pub const DEFAULT_MATCH_RADIUS: f64 = 0.05;

/// Thresholds for a nearest classified face lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QueryConfig {
    /// Fragments whose origin is farther than this from the query point are
    /// not scanned.
    pub cutoff_distance: f64,

    /// A face matches when its world-space centroid is at most this far from
    /// the query point (inclusive).
    pub match_radius: f64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            cutoff_distance: DEFAULT_CUTOFF_DISTANCE,
            match_radius: DEFAULT_MATCH_RADIUS,
        }
    }
}

impl QueryConfig {
    /// Tighter thresholds: 2 m cutoff, 2 cm match radius.
    #[must_use]
    pub const fn precise() -> Self {
        Self {
            cutoff_distance: 2.0,
            match_radius: 0.02,
        }
    }

    /// Looser thresholds: 8 m cutoff, 10 cm match radius.
    #[must_use]
    pub const fn coarse() -> Self {
        Self {
            cutoff_distance: 8.0,
            match_radius: 0.10,
        }
    }

    /// Set the fragment cutoff distance.
    #[must_use]
    pub const fn with_cutoff_distance(mut self, cutoff_distance: f64) -> Self {
        self.cutoff_distance = cutoff_distance;
        self
    }

    /// Set the face match radius.
    #[must_use]
    pub const fn with_match_radius(mut self, match_radius: f64) -> Self {
        self.match_radius = match_radius;
        self
    }

    /// Check that both thresholds are usable.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidConfig`] if either threshold is negative or
    /// not finite.
    pub fn validate(&self) -> Result<()> {
        if !self.cutoff_distance.is_finite() || self.cutoff_distance < 0.0 {
            return Err(QueryError::invalid_config(format!(
                "cutoff distance must be finite and non-negative, got {}",
                self.cutoff_distance
            )));
        }
        if !self.match_radius.is_finite() || self.match_radius < 0.0 {
            return Err(QueryError::invalid_config(format!(
                "match radius must be finite and non-negative, got {}",
                self.match_radius
            )));
        }
        Ok(())
    }
}
