//! Tap-to-tap measurement and overlay helpers for scene semantics.
//!
//! This crate provides:
//!
//! - [`measure_distance`] - Euclidean distance between two world points
//! - [`MeasurementSession`] - Pairs successive taps and measures between them
//! - [`box_edges`] - The twelve line segments outlining an axis-aligned box
//! - [`TrackingState`] - Camera tracking quality and its status line
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. Rendering the
//! labels and line segments is left to the host.
//!
//! # Example
//!
//! ```
//! use scene_measure::{MeasurementSession, TrackingState};
//! use nalgebra::Point3;
//!
//! let mut session = MeasurementSession::new();
//! session.tap(Point3::new(0.0, 0.0, 0.0));
//! let measurement = session.tap(Point3::new(1.0, 0.0, 0.0)).unwrap();
//!
//! assert_eq!(measurement.label(), "Distance: 100.0 cm");
//! assert_eq!(TrackingState::status_or_loading(None), "Camera Loading");
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod distance;
mod error;
mod overlay;
mod session;

pub use distance::{DistanceMeasurement, measure_distance};
pub use error::{MeasureError, MeasureResult};
pub use overlay::{LOADING_STATUS, TrackingState, box_edges};
pub use session::MeasurementSession;
