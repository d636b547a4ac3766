//! Axis-aligned rectangle geometry for hitboxes
//!
//! Screen coordinates: x grows right, y grows down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle of `size` centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Rectangle of `size` whose bottom edge is centered on `bottom`
    pub fn from_bottom_center(bottom: Vec2, size: Vec2) -> Self {
        Self {
            min: Vec2::new(bottom.x - size.x / 2.0, bottom.y - size.y),
            max: Vec2::new(bottom.x + size.x / 2.0, bottom.y),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Overlap test; touching edges count as overlap, empty rects never do
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.width() <= 0.0 || self.height() <= 0.0 {
            return false;
        }
        if other.width() <= 0.0 || other.height() <= 0.0 {
            return false;
        }
        !(self.max.x < other.min.x
            || self.max.y < other.min.y
            || self.min.x > other.max.x
            || self.min.y > other.max.y)
    }

    /// Point containment (inclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}
