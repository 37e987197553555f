//! Axis-aligned rectangle
//!
//! World space is y-up with the ground baseline at `y = 0`. `pos` is the
//! bottom-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width.max(0.0), height.max(0.0)),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Same rectangle moved to a new left edge
    pub fn with_x(mut self, x: f32) -> Self {
        self.pos.x = x;
        self
    }

    /// Depth of overlap on each axis (negative or zero when apart)
    pub fn overlap(&self, other: &Rect) -> Vec2 {
        Vec2::new(
            self.right().min(other.right()) - self.left().max(other.left()),
            self.top().min(other.top()) - self.bottom().max(other.bottom()),
        )
    }

    /// Strict intersection: touching edges do not count
    pub fn intersects(&self, other: &Rect) -> bool {
        let overlap = self.overlap(other);
        overlap.x > 0.0 && overlap.y > 0.0
    }
}
