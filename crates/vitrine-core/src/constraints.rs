//! Layout constraints passed down during measurement.

use crate::geometry::Size;
use serde::{Deserialize, Serialize};

/// Min/max bounds a widget must size itself within.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Constraints {
    /// Minimum width
    pub min_width: f32,
    /// Minimum height
    pub min_height: f32,
    /// Maximum width
    pub max_width: f32,
    /// Maximum height
    pub max_height: f32,
}

impl Constraints {
    /// Constraints that force an exact size.
    #[must_use]
    pub const fn tight(size: Size) -> Self {
        Self {
            min_width: size.width,
            min_height: size.height,
            max_width: size.width,
            max_height: size.height,
        }
    }

    /// Constraints with no minimum and the given maximum.
    #[must_use]
    pub const fn loose(max: Size) -> Self {
        Self {
            min_width: 0.0,
            min_height: 0.0,
            max_width: max.width,
            max_height: max.height,
        }
    }

    /// Clamp a preferred size into these constraints.
    #[must_use]
    pub fn constrain(&self, size: Size) -> Size {
        Size::new(
            size.width.clamp(self.min_width, self.max_width),
            size.height.clamp(self.min_height, self.max_height),
        )
    }
}
