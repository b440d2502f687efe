//! Axis-aligned bounding boxes
//!
//! Screen coordinates: x grows right, y grows down. A rect is stored as its
//! top-left (`min`) and bottom-right (`max`) corners, matching the
//! `[x0, y0, x1, y1]` layout used by save files.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            min: Vec2::new(x0, y0),
            max: Vec2::new(x1, y1),
        }
    }

    /// Rectangle of the given size centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap test; touching edges do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Shrink each side by the matching inset amount
    pub fn inset(&self, inset: Inset) -> Rect {
        Rect {
            min: self.min + Vec2::new(inset.left, inset.top),
            max: self.max - Vec2::new(inset.right, inset.bottom),
        }
    }

    pub fn translated(&self, delta: Vec2) -> Rect {
        Rect {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    pub fn as_array(&self) -> [f32; 4] {
        [self.min.x, self.min.y, self.max.x, self.max.y]
    }
}

/// Per-side shrink amounts applied before a collision test
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Inset {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Inset {
    pub const ZERO: Inset = Inset::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn uniform(amount: f32) -> Self {
        Self::new(amount, amount, amount, amount)
    }

    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self::new(horizontal, vertical, horizontal, vertical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 15.0, 15.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 20.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 20.0);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn test_inset_can_turn_hit_into_miss() {
        let alien = Rect::from_center(Vec2::new(100.0, 100.0), Vec2::splat(50.0));
        // Laser grazing the alien's left edge
        let laser = Rect::new(73.0, 90.0, 77.0, 126.0);
        assert!(laser.intersects(&alien));
        assert!(!laser.intersects(&alien.inset(Inset::new(7.0, 0.0, 7.0, 15.0))));
    }

    #[test]
    fn test_from_center_round_trip() {
        let r = Rect::new(350.0, 625.0, 400.0, 675.0);
        let again = Rect::from_center(r.center(), r.size());
        assert_eq!(r, again);
        assert_eq!(r.as_array(), [350.0, 625.0, 400.0, 675.0]);
    }

    #[test]
    fn test_muzzle_inset() {
        let cannon = Rect::from_center(Vec2::new(375.0, 650.0), Vec2::splat(50.0));
        let muzzle = cannon.inset(Inset::symmetric(23.0, 7.0));
        assert_eq!(muzzle, Rect::new(373.0, 632.0, 377.0, 668.0));
    }
}
