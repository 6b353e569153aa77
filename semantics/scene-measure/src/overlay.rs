//! Overlay helpers: box outlines and tracking status text.

use std::fmt;

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The twelve edges of an axis-aligned box as line segments.
///
/// Order: the four edges of the `min.z` face, the four edges of the `max.z`
/// face, then the four edges joining them. Corners are not reordered, so
/// `min` and `max` may be given either way round.
///
/// # Example
///
/// ```
/// use scene_measure::box_edges;
/// use nalgebra::Point3;
///
/// let edges = box_edges(Point3::origin(), Point3::new(1.0, 2.0, 3.0));
/// let total: f64 = edges.iter().map(|(a, b)| (b - a).norm()).sum();
/// assert!((total - 4.0 * (1.0 + 2.0 + 3.0)).abs() < 1e-10);
/// ```
#[must_use]
pub fn box_edges(min: Point3<f64>, max: Point3<f64>) -> [(Point3<f64>, Point3<f64>); 12] {
    let corner = |x: f64, y: f64, z: f64| Point3::new(x, y, z);
    let (x0, y0, z0) = (min.x, min.y, min.z);
    let (x1, y1, z1) = (max.x, max.y, max.z);
    [
        // Bottom
        (corner(x0, y0, z0), corner(x1, y0, z0)),
        (corner(x1, y0, z0), corner(x1, y1, z0)),
        (corner(x1, y1, z0), corner(x0, y1, z0)),
        (corner(x0, y1, z0), corner(x0, y0, z0)),
        // Top
        (corner(x0, y0, z1), corner(x1, y0, z1)),
        (corner(x1, y0, z1), corner(x1, y1, z1)),
        (corner(x1, y1, z1), corner(x0, y1, z1)),
        (corner(x0, y1, z1), corner(x0, y0, z1)),
        // Sides
        (corner(x0, y0, z0), corner(x0, y0, z1)),
        (corner(x1, y0, z0), corner(x1, y0, z1)),
        (corner(x1, y1, z0), corner(x1, y1, z1)),
        (corner(x0, y1, z0), corner(x0, y1, z1)),
    ]
}

/// Camera tracking quality reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TrackingState {
    /// No pose available.
    NotAvailable,
    /// Pose available but degraded.
    Limited,
    /// Tracking normally.
    Normal,
}

/// Status text shown before the first tracking update.
pub const LOADING_STATUS: &str = "Camera Loading";

impl TrackingState {
    /// Status line for the overlay.
    #[must_use]
    pub const fn status_text(self) -> &'static str {
        match self {
            Self::NotAvailable => "Camera Not available",
            Self::Limited => "Camera limited",
            Self::Normal => "Camera Ready",
        }
    }

    /// Status line for an optional state, [`LOADING_STATUS`] when unknown.
    #[must_use]
    pub const fn status_or_loading(state: Option<Self>) -> &'static str {
        match state {
            Some(state) => state.status_text(),
            None => LOADING_STATUS,
        }
    }
}

impl fmt::Display for TrackingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.status_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_edges_are_axis_aligned_and_closed() {
        let edges = box_edges(Point3::new(-1.0, -1.0, 0.0), Point3::new(1.0, 1.0, 0.5));
        for (a, b) in &edges {
            let d = b - a;
            let nonzero = [d.x, d.y, d.z].iter().filter(|c| c.abs() > 0.0).count();
            assert_eq!(nonzero, 1, "edge {a:?} -> {b:?} is not axis aligned");
        }
        // Bottom loop closes on itself.
        assert_eq!(edges[0].0, edges[3].1);
        // Top loop closes on itself.
        assert_eq!(edges[4].0, edges[7].1);
        // Verticals span the full height.
        assert!(edges[8..].iter().all(|(a, b)| (b.z - a.z - 0.5).abs() < 1e-12));
    }

    #[test]
    fn degenerate_box_has_zero_length_edges() {
        let p = Point3::new(2.0, 2.0, 2.0);
        assert!(box_edges(p, p).iter().all(|(a, b)| a == b));
    }

    #[test]
    fn status_texts() {
        assert_eq!(TrackingState::Normal.status_text(), "Camera Ready");
        assert_eq!(TrackingState::Limited.to_string(), "Camera limited");
        assert_eq!(
            TrackingState::status_or_loading(Some(TrackingState::NotAvailable)),
            "Camera Not available"
        );
        assert_eq!(TrackingState::status_or_loading(None), "Camera Loading");
    }
}
