//! Canvas 2D painter for draw lists

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{DrawCmd, DrawList, Shake, Viewport, colors};
use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};

const FONT_FAMILY: &str = "'Noto Color Emoji', 'Segoe UI Emoji', sans-serif";
const LINE_HEIGHT: f32 = 1.2;

pub struct CanvasPainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    viewport: Viewport,
    shake: Shake,
    rng: Pcg32,
}

impl CanvasPainter {
    pub fn new(canvas: HtmlCanvasElement, seed: u64) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        let mut painter = Self {
            canvas,
            ctx,
            viewport: Viewport::fit(WORLD_WIDTH, WORLD_HEIGHT),
            shake: Shake::default(),
            rng: Pcg32::seed_from_u64(seed),
        };
        painter.resize();
        Ok(painter)
    }

    /// Match the backing store to the element size and device pixel ratio
    pub fn resize(&mut self) {
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        let width = (self.canvas.client_width() as f64 * dpr).max(1.0) as u32;
        let height = (self.canvas.client_height() as f64 * dpr).max(1.0) as u32;
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            log::debug!("Canvas resized to {}x{}", width, height);
        }
        self.viewport = Viewport::fit(width as f32, height as f32);
    }

    /// Convert a pointer position in client (CSS) pixels to world space
    pub fn client_to_world(&self, client_x: f32, client_y: f32) -> Vec2 {
        let rect = self.canvas.get_bounding_client_rect();
        let css = Viewport::fit(rect.width() as f32, rect.height() as f32);
        css.to_world(Vec2::new(
            client_x - rect.left() as f32,
            client_y - rect.top() as f32,
        ))
    }

    pub fn shake(&mut self, duration: f32, intensity: f32) {
        self.shake.start(duration, intensity);
    }

    pub fn paint(&mut self, list: &DrawList, dt: f32) {
        let ctx = &self.ctx;
        let width = self.canvas.width() as f64;
        let height = self.canvas.height() as f64;

        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
        ctx.set_fill_style_str(colors::BACKGROUND);
        ctx.fill_rect(0.0, 0.0, width, height);

        let shake = self.shake.offset(&mut self.rng);
        self.shake.advance(dt);
        let origin = self.viewport.offset + shake * self.viewport.scale;
        let scale = self.viewport.scale as f64;
        ctx.set_transform(scale, 0.0, 0.0, scale, origin.x as f64, origin.y as f64)
            .ok();

        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        for cmd in &list.commands {
            match cmd {
                DrawCmd::Text {
                    text,
                    center,
                    size,
                    rotation,
                    color,
                } => {
                    ctx.set_font(&format!("{}px {}", size, FONT_FAMILY));
                    ctx.set_fill_style_str(color);
                    ctx.save();
                    ctx.translate(center.x as f64, center.y as f64).ok();
                    if *rotation != 0.0 {
                        ctx.rotate(*rotation as f64).ok();
                    }
                    let lines: Vec<&str> = text.lines().collect();
                    let step = size * LINE_HEIGHT;
                    let top = -step * (lines.len().saturating_sub(1)) as f32 * 0.5;
                    for (i, line) in lines.iter().enumerate() {
                        ctx.fill_text(line, 0.0, (top + step * i as f32) as f64).ok();
                    }
                    ctx.restore();
                }
                DrawCmd::Fill { rect, color } => {
                    ctx.set_fill_style_str(color);
                    ctx.fill_rect(
                        rect.min.x as f64,
                        rect.min.y as f64,
                        rect.width() as f64,
                        rect.height() as f64,
                    );
                }
                DrawCmd::Outline { rect, color } => {
                    ctx.set_stroke_style_str(color);
                    ctx.set_line_width(2.0);
                    ctx.stroke_rect(
                        rect.min.x as f64,
                        rect.min.y as f64,
                        rect.width() as f64,
                        rect.height() as f64,
                    );
                }
            }
        }
    }
}
