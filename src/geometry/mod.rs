//! # Geometry Primitives
//!
//! Sizes, rectangles and edge insets in layout points, plus the
//! pixel-grid rounding the layout engine relies on.
//!
//! Everything the engine allocates is snapped to the device pixel grid given
//! by a screen scale (points → pixels). Widths being handed out are floored,
//! required minimums are ceiled, insets are rounded. Without this, adjacent
//! cells and separators land on half pixels and render with blurry seams.

use serde::{Deserialize, Serialize};

/// Floor `value` to the pixel grid of `scale`.
pub fn floored_to_scale(value: f64, scale: f64) -> f64 {
    if scale <= 0.0 {
        return value.floor();
    }
    (value * scale).floor() / scale
}

/// Ceil `value` to the pixel grid of `scale`.
pub fn ceiled_to_scale(value: f64, scale: f64) -> f64 {
    if scale <= 0.0 {
        return value.ceil();
    }
    (value * scale).ceil() / scale
}

/// Round `value` to the nearest pixel of `scale`.
pub fn rounded_to_scale(value: f64, scale: f64) -> f64 {
    if scale <= 0.0 {
        return value.round();
    }
    (value * scale).round() / scale
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Whether the two rectangles share any area. Touching edges don't count.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.max_x()
            && other.x < self.max_x()
            && self.y < other.max_y()
            && other.y < self.max_y()
    }

    /// Shrink the rectangle by `insets` on each side.
    pub fn inset_by(&self, insets: &EdgeInsets) -> Rect {
        Rect {
            x: self.x + insets.left,
            y: self.y + insets.top,
            width: (self.width - insets.horizontal()).max(0.0),
            height: (self.height - insets.vertical()).max(0.0),
        }
    }

    /// Mirror the rectangle about the vertical centre line of a container
    /// `width` wide. Applying it twice returns the original rectangle.
    pub fn rtl_flipped(&self, width: f64) -> Rect {
        Rect {
            x: width - self.max_x(),
            ..*self
        }
    }
}

/// Insets from each edge of a rectangle, in points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeInsets {
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub bottom: f64,
    #[serde(default)]
    pub right: f64,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub fn uniform(v: f64) -> Self {
        Self::new(v, v, v, v)
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// Swap leading and trailing insets for right-to-left presentation.
    pub fn horizontally_flipped(&self) -> EdgeInsets {
        EdgeInsets {
            left: self.right,
            right: self.left,
            ..*self
        }
    }

    pub fn floored_to_scale(&self, scale: f64) -> EdgeInsets {
        EdgeInsets {
            top: floored_to_scale(self.top, scale),
            left: floored_to_scale(self.left, scale),
            bottom: floored_to_scale(self.bottom, scale),
            right: floored_to_scale(self.right, scale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_rounding_snaps_to_pixels() {
        assert_eq!(floored_to_scale(10.3, 2.0), 10.0);
        assert_eq!(floored_to_scale(10.7, 2.0), 10.5);
        assert_eq!(ceiled_to_scale(10.1, 2.0), 10.5);
        assert_eq!(ceiled_to_scale(10.6, 3.0), 32.0 / 3.0);
        assert_eq!(rounded_to_scale(10.2, 2.0), 10.0);
        assert_eq!(rounded_to_scale(10.3, 2.0), 10.5);
    }

    #[test]
    fn test_zero_scale_falls_back_to_whole_points() {
        assert_eq!(floored_to_scale(4.6, 0.0), 4.0);
        assert_eq!(ceiled_to_scale(4.2, 0.0), 5.0);
    }

    #[test]
    fn test_rtl_flip_mirrors_about_centre() {
        let rect = Rect::new(10.0, 5.0, 30.0, 20.0);
        let flipped = rect.rtl_flipped(100.0);
        assert_eq!(flipped, Rect::new(60.0, 5.0, 30.0, 20.0));
        assert_eq!(flipped.rtl_flipped(100.0), rect);
    }

    #[test]
    fn test_intersects_ignores_touching_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(9.0, 9.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
        assert!(!a.intersects(&Rect::new(2.0, 2.0, 0.0, 5.0)));
    }

    #[test]
    fn test_insets_flip_horizontally() {
        let insets = EdgeInsets::new(1.0, 2.0, 3.0, 4.0);
        let flipped = insets.horizontally_flipped();
        assert_eq!(flipped, EdgeInsets::new(1.0, 4.0, 3.0, 2.0));
        assert_eq!(flipped.horizontal(), insets.horizontal());
    }

    #[test]
    fn test_inset_by_never_goes_negative() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let inner = rect.inset_by(&EdgeInsets::uniform(8.0));
        assert_eq!(inner.x, 8.0);
        assert_eq!(inner.width, 0.0);
    }
}
