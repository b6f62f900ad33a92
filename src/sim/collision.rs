//! Collision tests between the angel and the two targets
//!
//! The orb test is circular (angel treated as a circle of half its width),
//! the obstacle test is a plain axis-aligned box overlap.

use glam::Vec2;

/// Axis-aligned rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        crate::box_center(self.min, self.size)
    }
}

/// Strict overlap: rectangles that only share an edge do not collide
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    let (a_max, b_max) = (a.max(), b.max());
    a.min.x < b_max.x && a_max.x > b.min.x && a.min.y < b_max.y && a_max.y > b.min.y
}

/// True when the distance between the centers is strictly less than the sum
/// of the radii
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// Angel-vs-orb pickup test
pub fn angel_reaches_orb(angel: &Rect, orb_center: Vec2, orb_radius: f32) -> bool {
    circles_overlap(angel.center(), angel.size.x / 2.0, orb_center, orb_radius)
}
