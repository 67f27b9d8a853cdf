//! Screen-space rectangles.

use serde::{Deserialize, Serialize};

/// A rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns true if two rectangles intersect.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Returns the intersection of two rectangles, or None if they don't intersect.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }

        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        Some(Self::new(x, y, right - x, bottom - y))
    }

    /// The four edge bands of an outline of `thickness` drawn outside this rect.
    #[must_use]
    pub fn outline(&self, thickness: f32) -> [Self; 4] {
        let t = thickness;
        [
            Self::new(self.x - t, self.y - t, self.width + 2.0 * t, t),
            Self::new(self.x - t, self.bottom(), self.width + 2.0 * t, t),
            Self::new(self.x - t, self.y, t, self.height),
            Self::new(self.right(), self.y, t, self.height),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);

        let intersection = a.intersection(&b).unwrap();
        assert_eq!(intersection, Rect::new(50.0, 50.0, 50.0, 50.0));
        assert!(a.intersection(&Rect::new(200.0, 0.0, 5.0, 5.0)).is_none());
    }

    #[test]
    fn test_outline_surrounds_rect() {
        let rect = Rect::new(10.0, 10.0, 4.0, 4.0);
        let bands = rect.outline(1.0);

        assert_eq!(bands[0], Rect::new(9.0, 9.0, 6.0, 1.0));
        assert_eq!(bands[1], Rect::new(9.0, 14.0, 6.0, 1.0));
        assert_eq!(bands[2], Rect::new(9.0, 10.0, 1.0, 4.0));
        assert_eq!(bands[3], Rect::new(14.0, 10.0, 1.0, 4.0));
    }
}
