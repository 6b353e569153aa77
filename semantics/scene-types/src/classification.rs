//! Semantic surface classification.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::LabelColor;

/// Semantic label attached to a reconstructed mesh face.
///
/// The set is closed. [`Classification::None`] is reserved for faces the
/// reconstruction has not (yet) classified.
///
/// The discriminants match the raw label bytes emitted by the reconstruction
/// pipeline, see [`Classification::from_raw`].
///
/// # Example
///
/// ```
/// use scene_types::{Classification, LabelColor};
///
/// let label = Classification::Wall;
/// assert_eq!(label.name(), "Wall");
/// assert_eq!(label.color(), LabelColor::GREEN);
/// assert!(label.is_classified());
/// assert!(!Classification::None.is_classified());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Classification {
    /// Not classified, or classification unknown.
    #[default]
    None = 0,
    /// Vertical structural surface.
    Wall = 1,
    /// Walkable horizontal surface.
    Floor = 2,
    /// Overhead horizontal surface.
    Ceiling = 3,
    /// Table top.
    Table = 4,
    /// Chair, sofa, bench.
    Seat = 5,
    /// Window pane or frame.
    Window = 6,
    /// Door leaf or frame.
    Door = 7,
}

/// Display name and color per variant, indexed by discriminant.
const LABELS: [(&str, LabelColor); 8] = [
    ("None", LabelColor::LIGHT_GRAY),
    ("Wall", LabelColor::GREEN),
    ("Floor", LabelColor::RED),
    ("Ceiling", LabelColor::CYAN),
    ("Table", LabelColor::YELLOW),
    ("Seat", LabelColor::PURPLE),
    ("Window", LabelColor::BLUE),
    ("Door", LabelColor::BROWN),
];

impl Classification {
    /// Every classification, in discriminant order.
    pub const ALL: [Self; 8] = [
        Self::None,
        Self::Wall,
        Self::Floor,
        Self::Ceiling,
        Self::Table,
        Self::Seat,
        Self::Window,
        Self::Door,
    ];

    /// Map a raw label byte from the reconstruction pipeline.
    ///
    /// Unknown values map to [`Classification::None`].
    ///
    /// # Example
    ///
    /// ```
    /// use scene_types::Classification;
    ///
    /// assert_eq!(Classification::from_raw(2), Classification::Floor);
    /// assert_eq!(Classification::from_raw(200), Classification::None);
    /// ```
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Self::Wall,
            2 => Self::Floor,
            3 => Self::Ceiling,
            4 => Self::Table,
            5 => Self::Seat,
            6 => Self::Window,
            7 => Self::Door,
            _ => Self::None,
        }
    }

    /// The raw label byte.
    #[inline]
    #[must_use]
    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    /// Human-readable name shown on the label.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        LABELS[self as usize].0
    }

    /// Color used to render the label.
    #[inline]
    #[must_use]
    pub const fn color(self) -> LabelColor {
        LABELS[self as usize].1
    }

    /// Whether this is an actual label rather than [`Classification::None`].
    #[inline]
    #[must_use]
    pub const fn is_classified(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no known classification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown classification: {0:?}")]
pub struct ParseClassificationError(pub String);

impl FromStr for Classification {
    type Err = ParseClassificationError;

    /// Parse a classification name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseClassificationError(s.to_string()))
    }
}
