//! Display colors for classification labels.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RGB color with 8-bit components.
///
/// Used by renderers to tint the label placed for a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LabelColor {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
}

impl LabelColor {
    /// Create a new color from RGB components.
    ///
    /// # Example
    ///
    /// ```
    /// use scene_types::LabelColor;
    ///
    /// let teal = LabelColor::new(0, 170, 165);
    /// assert_eq!(teal.g, 170);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Light gray (170, 170, 170).
    pub const LIGHT_GRAY: Self = Self::new(170, 170, 170);

    /// Red (255, 0, 0).
    pub const RED: Self = Self::new(255, 0, 0);

    /// Green (0, 255, 0).
    pub const GREEN: Self = Self::new(0, 255, 0);

    /// Blue (0, 0, 255).
    pub const BLUE: Self = Self::new(0, 0, 255);

    /// Yellow (255, 255, 0).
    pub const YELLOW: Self = Self::new(255, 255, 0);

    /// Cyan (0, 255, 255).
    pub const CYAN: Self = Self::new(0, 255, 255);

    /// Brown (153, 102, 51).
    pub const BROWN: Self = Self::new(153, 102, 51);

    /// Purple (128, 0, 128).
    pub const PURPLE: Self = Self::new(128, 0, 128);
}

impl Default for LabelColor {
    fn default() -> Self {
        Self::LIGHT_GRAY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_colors_are_distinct() {
        let named = [
            LabelColor::LIGHT_GRAY,
            LabelColor::RED,
            LabelColor::GREEN,
            LabelColor::BLUE,
            LabelColor::YELLOW,
            LabelColor::CYAN,
            LabelColor::BROWN,
            LabelColor::PURPLE,
        ];
        for (i, a) in named.iter().enumerate() {
            assert!(named[i + 1..].iter().all(|b| a != b));
        }
    }

    #[test]
    fn default_is_light_gray() {
        assert_eq!(LabelColor::default(), LabelColor::LIGHT_GRAY);
    }
}
