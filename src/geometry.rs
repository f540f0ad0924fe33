//! Integer pixel geometry shared by templates, the matcher and inters.
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Pixel location in image coordinates.
pub type PixelPoint = Point2<i32>;

/// Pixel offset, e.g. a key point or anchor relative to a template origin.
pub type Offset = Vector2<i32>;

/// Axis-aligned rectangle with half-open extent `[x, x + width) × [y, y + height)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner.
    #[inline]
    pub fn origin(&self) -> PixelPoint {
        PixelPoint::new(self.x, self.y)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    #[inline]
    pub fn contains(&self, p: &PixelPoint) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    /// Same rectangle shifted by `d`.
    #[inline]
    pub fn translated(&self, d: Offset) -> Self {
        Self {
            x: self.x + d.x,
            y: self.y + d.y,
            ..*self
        }
    }

    /// Intersection with `other`, `None` when they do not overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = (self.x + self.width).min(other.x + other.width);
        let y1 = (self.y + self.height).min(other.y + other.height);
        let r = Rect::new(x0, y0, x1 - x0, y1 - y0);
        (!r.is_empty()).then_some(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(2, 3, 4, 5);
        assert!(r.contains(&PixelPoint::new(2, 3)));
        assert!(r.contains(&PixelPoint::new(5, 7)));
        assert!(!r.contains(&PixelPoint::new(6, 7)));
        assert!(!r.contains(&PixelPoint::new(5, 8)));
    }

    #[test]
    fn intersection_clips_and_detects_disjoint() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, -2, 10, 4);
        assert_eq!(a.intersection(&b), Some(Rect::new(5, 0, 5, 2)));
        assert_eq!(a.intersection(&Rect::new(10, 0, 3, 3)), None);
    }

    #[test]
    fn translated_keeps_size() {
        let r = Rect::new(1, 1, 3, 2).translated(Offset::new(-4, 5));
        assert_eq!(r, Rect::new(-3, 6, 3, 2));
    }
}
