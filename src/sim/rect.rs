//! Axis-aligned bounding boxes for hit tests

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box from `(x1, y1)` top-left to `(x2, y2)` bottom-right.
///
/// Screen coordinates: y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Rect {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Box of `width` x `height` centered on `center`.
    pub fn from_center(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            x1: center.x - width / 2.0,
            y1: center.y - height / 2.0,
            x2: center.x + width / 2.0,
            y2: center.y + height / 2.0,
        }
    }

    /// Strict interpenetration test: boxes that merely touch edges are
    /// disjoint.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x1 < other.x2 && self.x2 > other.x1 && self.y1 < other.y2 && self.y2 > other.y1
    }

    /// Whether `point` lies strictly inside the box (a point is a zero-size
    /// box).
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.overlaps(&Rect::new(point.x, point.y, point.x, point.y))
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_boxes() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 15.0, 15.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_disjoint_boxes() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 0.0, 30.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_are_disjoint() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 20.0, 10.0);
        assert!(!a.overlaps(&b));
        let c = Rect::new(0.0, 10.0, 10.0, 20.0);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_contains_point() {
        let r = Rect::from_center(Vec2::new(50.0, 50.0), 20.0, 10.0);
        assert!(r.contains_point(Vec2::new(50.0, 50.0)));
        assert!(r.contains_point(Vec2::new(41.0, 46.0)));
        // on the edge counts as outside
        assert!(!r.contains_point(Vec2::new(40.0, 50.0)));
        assert!(!r.contains_point(Vec2::new(70.0, 50.0)));
    }

    #[test]
    fn test_from_center() {
        let r = Rect::from_center(Vec2::new(100.0, 200.0), 50.0, 30.0);
        assert_eq!(r.x1, 75.0);
        assert_eq!(r.y1, 185.0);
        assert_eq!(r.x2, 125.0);
        assert_eq!(r.y2, 215.0);
        assert_eq!(r.center(), Vec2::new(100.0, 200.0));
    }
}
