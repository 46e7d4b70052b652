//! Geometric primitives for visualization.
//!
//! `Point` carries sub-pixel positions for curves; `Rect` is an integer pixel
//! region used for panel cells and plot areas.

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: u32,
    /// Y coordinate of the top-left corner.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Exclusive right edge.
    #[must_use]
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Horizontal center.
    #[must_use]
    pub const fn center_x(&self) -> u32 {
        self.x + self.width / 2
    }

    /// Vertical center.
    #[must_use]
    pub const fn center_y(&self) -> u32 {
        self.y + self.height / 2
    }

    /// Shrink the rectangle by per-side insets, saturating at zero size.
    #[must_use]
    pub fn inset(&self, left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self::new(
            self.x + left,
            self.y + top,
            self.width.saturating_sub(left + right),
            self.height.saturating_sub(top + bottom),
        )
    }

    /// Grow the rectangle by `by` pixels on every side, saturating at zero.
    #[must_use]
    pub fn expand(&self, by: u32) -> Self {
        let x = self.x.saturating_sub(by);
        let y = self.y.saturating_sub(by);
        Self::new(x, y, self.right() + by - x, self.bottom() + by - y)
    }

    /// Whether the rectangle covers no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10, 20, 30, 40);
        assert_eq!(rect.right(), 40);
        assert_eq!(rect.bottom(), 60);
        assert_eq!(rect.center_x(), 25);
        assert_eq!(rect.center_y(), 40);
    }

    #[test]
    fn test_rect_inset_saturates() {
        let rect = Rect::new(0, 0, 10, 10);
        let inner = rect.inset(2, 3, 4, 5);
        assert_eq!(inner, Rect::new(2, 3, 4, 2));
        assert!(rect.inset(8, 0, 8, 0).is_empty());
    }

    #[test]
    fn test_rect_expand() {
        let rect = Rect::new(5, 5, 10, 10).expand(1);
        assert_eq!(rect, Rect::new(4, 4, 12, 12));
        assert_eq!(Rect::new(0, 0, 4, 4).expand(2), Rect::new(0, 0, 6, 6));
    }
}
