//! Two-tap measurement sessions.
//!
//! The user taps a point, then another, and sees the distance between them.
//! A third tap starts a new pair.

use nalgebra::Point3;
use tracing::debug;

use crate::distance::{DistanceMeasurement, measure_distance};
use crate::error::{MeasureError, MeasureResult};

/// Collects tapped world points in pairs and measures between them.
///
/// # Example
///
/// ```
/// use scene_measure::MeasurementSession;
/// use nalgebra::Point3;
///
/// let mut session = MeasurementSession::new();
/// assert!(session.tap(Point3::origin()).is_none());
///
/// let m = session.tap(Point3::new(0.0, 0.25, 0.0)).unwrap();
/// assert_eq!(m.label(), "Distance: 25.0 cm");
///
/// // A third tap clears the pair and starts over.
/// assert!(session.tap(Point3::new(1.0, 0.0, 0.0)).is_none());
/// assert_eq!(session.points().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MeasurementSession {
    points: Vec<Point3<f64>>,
    last_measurement: Option<DistanceMeasurement>,
}

impl MeasurementSession {
    /// Create a session with no points.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tapped point.
    ///
    /// If a pair is already complete it is cleared first. Returns the
    /// measurement when this tap completes a pair.
    pub fn tap(&mut self, point: Point3<f64>) -> Option<DistanceMeasurement> {
        if self.points.len() > 1 {
            self.points.clear();
        }
        let previous = self.points.last().copied();
        self.points.push(point);

        let measurement = measure_distance(previous?, point);
        debug!(distance = measurement.distance, "measured between taps");
        self.last_measurement = Some(measurement);
        Some(measurement)
    }

    /// Points of the current (possibly incomplete) pair.
    #[must_use]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// The most recent completed measurement, kept across new pairs.
    #[must_use]
    pub const fn last_measurement(&self) -> Option<&DistanceMeasurement> {
        self.last_measurement.as_ref()
    }

    /// Measure the current pair.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::InsufficientPoints`] if fewer than two points
    /// have been tapped.
    pub fn current(&self) -> MeasureResult<DistanceMeasurement> {
        match self.points.as_slice() {
            [from, to] => Ok(measure_distance(*from, *to)),
            other => Err(MeasureError::insufficient_points(2, other.len())),
        }
    }

    /// Where to place the distance label: the midpoint of the last
    /// completed measurement.
    #[must_use]
    pub fn label_anchor(&self) -> Option<(Point3<f64>, String)> {
        self.last_measurement
            .as_ref()
            .map(|m| (m.midpoint(), m.label()))
    }

    /// Forget all points and the last measurement.
    pub fn reset(&mut self) {
        self.points.clear();
        self.last_measurement = None;
    }
}
