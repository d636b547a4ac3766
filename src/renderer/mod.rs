//! Rendering module
//!
//! Scenes describe a frame as a flat list of draw commands in world
//! coordinates. The canvas painter (wasm only) scales and paints them.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;

use glam::Vec2;
use rand::Rng;

use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::sim::Rect;

/// Colors for game elements (CSS)
pub mod colors {
    pub const BACKGROUND: &str = "#000000";
    pub const TEXT: &str = "#ffffff";
    pub const ACCENT: &str = "#ff7496";
    pub const PRIORITY: &str = "#ff7c7c";
    pub const GOLD: &str = "#ffd700";
    pub const GROUND: &str = "#444444";
    pub const RUNNER: &str = "#00ffcc";
    pub const HITBOX: &str = "#ff0000";
}

/// A single draw operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Emoji or text centered on `center`
    Text {
        text: &'static str,
        center: Vec2,
        size: f32,
        /// Radians, clockwise
        rotation: f32,
        color: &'static str,
    },
    /// Filled rectangle
    Fill { rect: Rect, color: &'static str },
    /// Rectangle outline (debug hitboxes)
    Outline { rect: Rect, color: &'static str },
}

/// Commands for one frame, painted in order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn text(&mut self, text: &'static str, center: Vec2, size: f32, color: &'static str) {
        self.commands.push(DrawCmd::Text {
            text,
            center,
            size,
            rotation: 0.0,
            color,
        });
    }

    pub fn rotated_text(&mut self, text: &'static str, center: Vec2, size: f32, rotation: f32) {
        self.commands.push(DrawCmd::Text {
            text,
            center,
            size,
            rotation,
            color: colors::TEXT,
        });
    }

    pub fn fill(&mut self, rect: Rect, color: &'static str) {
        self.commands.push(DrawCmd::Fill { rect, color });
    }

    pub fn outline(&mut self, rect: Rect) {
        self.commands.push(DrawCmd::Outline {
            rect,
            color: colors::HITBOX,
        });
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Uniform scale from world space onto a surface, letterboxed and centered
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub offset: Vec2,
}

impl Viewport {
    /// Fit the world into a `width` x `height` surface
    pub fn fit(width: f32, height: f32) -> Self {
        let scale = (width / WORLD_WIDTH).min(height / WORLD_HEIGHT).max(f32::EPSILON);
        let offset = Vec2::new(
            (width - WORLD_WIDTH * scale) * 0.5,
            (height - WORLD_HEIGHT * scale) * 0.5,
        );
        Self { scale, offset }
    }

    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world * self.scale + self.offset
    }

    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.offset) / self.scale
    }
}

/// Camera shake, decaying linearly over its duration
#[derive(Debug, Clone, Copy, Default)]
pub struct Shake {
    remaining: f32,
    duration: f32,
    intensity: f32,
}

impl Shake {
    /// Start a shake; a stronger one already running is kept
    pub fn start(&mut self, duration: f32, intensity: f32) {
        if self.is_active() && self.intensity * self.remaining >= intensity * duration {
            return;
        }
        self.remaining = duration.max(0.0);
        self.duration = duration.max(0.0);
        self.intensity = intensity;
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn advance(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    /// World-space offset for this frame
    pub fn offset(&self, rng: &mut impl Rng) -> Vec2 {
        if !self.is_active() || self.duration <= 0.0 {
            return Vec2::ZERO;
        }
        let falloff = self.remaining / self.duration;
        let amount = self.intensity * falloff;
        Vec2::new(
            rng.random_range(-1.0f32..=1.0) * amount * WORLD_WIDTH,
            rng.random_range(-1.0f32..=1.0) * amount * WORLD_HEIGHT,
        )
    }
}
