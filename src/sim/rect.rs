//! Axis-aligned rectangles and damage hitboxes

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    /// Shrink by a fraction of the size on each side
    pub fn inset_fraction(&self, fx: f32, fy: f32) -> Self {
        Self {
            x: self.x + self.width * fx,
            y: self.y + self.height * fy,
            width: self.width * (1.0 - 2.0 * fx),
            height: self.height * (1.0 - 2.0 * fy),
        }
    }

    /// Shrink by a fixed margin on each side
    pub fn inset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width - 2.0 * dx,
            height: self.height - 2.0 * dy,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Overlap test. Touching edges count as overlapping.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.x + self.width < other.x
            || self.x > other.x + other.width
            || self.y + self.height < other.y
            || self.y > other.y + other.height)
    }
}

/// Anything with a damage hitbox (a shrunken inset of its sprite bounds)
pub trait Hitbox {
    fn hitbox(&self) -> Rect;

    fn hits<H: Hitbox + ?Sized>(&self, other: &H) -> bool {
        self.hitbox().overlaps(&other.hitbox())
    }
}
