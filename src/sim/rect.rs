//! Axis-aligned bounding boxes for all playfield entities

use glam::Vec2;

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

/// Center-based axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Construct from the midpoint of the bottom edge (spawn anchors are
    /// expressed this way)
    pub fn from_midbottom(midbottom: Vec2, size: Vec2) -> Self {
        Self {
            center: Vec2::new(midbottom.x, midbottom.y - size.y / 2.0),
            size,
        }
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    pub fn top(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    pub fn midbottom(&self) -> Vec2 {
        Vec2::new(self.center.x, self.bottom())
    }

    pub fn set_left(&mut self, x: f32) {
        self.center.x = x + self.size.x / 2.0;
    }

    pub fn set_right(&mut self, x: f32) {
        self.center.x = x - self.size.x / 2.0;
    }

    pub fn set_top(&mut self, y: f32) {
        self.center.y = y + self.size.y / 2.0;
    }

    /// Overlap test; touching edges do not count as overlap
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// True once the rect has fully left the playfield on any side
    pub fn off_field(&self) -> bool {
        self.left() > FIELD_WIDTH
            || self.right() < 0.0
            || self.top() > FIELD_HEIGHT
            || self.bottom() < 0.0
    }
}
