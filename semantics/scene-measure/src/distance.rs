//! Distance between two tapped world points.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The segment between two tapped points and its length in meters.
///
/// # Example
///
/// ```
/// use scene_measure::measure_distance;
/// use nalgebra::Point3;
///
/// let m = measure_distance(Point3::origin(), Point3::new(0.3, 0.4, 0.0));
///
/// assert!((m.distance - 0.5).abs() < 1e-10); // 3-4-5 triangle
/// assert_eq!(m.label(), "Distance: 50.0 cm");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DistanceMeasurement {
    /// First tapped point.
    pub from: Point3<f64>,
    /// Second tapped point.
    pub to: Point3<f64>,
    /// Length of the segment.
    pub distance: f64,
}

impl DistanceMeasurement {
    /// Vector from the first point to the second.
    #[must_use]
    pub fn direction(&self) -> Vector3<f64> {
        self.to - self.from
    }

    /// Unsigned extent of the segment along each axis.
    #[must_use]
    pub fn axis_deltas(&self) -> Vector3<f64> {
        self.direction().abs()
    }

    /// Center of the segment, where the overlay line and label are anchored.
    #[must_use]
    pub fn midpoint(&self) -> Point3<f64> {
        nalgebra::center(&self.from, &self.to)
    }

    /// Length in centimeters.
    #[must_use]
    pub fn centimeters(&self) -> f64 {
        self.distance * 100.0
    }

    /// Overlay text, e.g. `"Distance: 12.5 cm"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Distance: {:.1} cm", self.centimeters())
    }
}

/// Measure the segment between two world points.
#[must_use]
pub fn measure_distance(from: Point3<f64>, to: Point3<f64>) -> DistanceMeasurement {
    DistanceMeasurement {
        from,
        to,
        distance: nalgebra::distance(&from, &to),
    }
}
