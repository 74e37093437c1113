//! Rendering seam
//!
//! The simulation draws through the `Canvas` trait and never touches a real
//! surface. Hosts plug in a raster canvas; the headless binary uses
//! `TraceCanvas`, and tests use a recording canvas.

use crate::util::vec2::Vec2;

/// Background fill used for the full-surface clear before each frame
pub const BACKGROUND: Color = Color("#000000");

/// Fixed avatar palette; each player gets a stable slot at spawn
pub const PALETTE: [Color; 13] = [
    Color("#001f3f"),
    Color("#0074D9"),
    Color("#7FDBFF"),
    Color("#39CCCC"),
    Color("#3D9970"),
    Color("#2ECC40"),
    Color("#01FF70"),
    Color("#FFDC00"),
    Color("#FF851B"),
    Color("#FF4136"),
    Color("#85144b"),
    Color("#F012BE"),
    Color("#B10DC9"),
];

/// CSS-style hex color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub &'static str);

impl Color {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Color for a palette slot; indices wrap so a stored slot is always valid
pub fn palette_color(index: u8) -> Color {
    PALETTE[index as usize % PALETTE.len()]
}

/// 2D raster surface consumed by the render pass
pub trait Canvas {
    /// Full-surface clear preceding each frame's draw pass
    fn clear(&mut self, color: Color);
    /// Draw one filled circle
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
}

/// Canvas that logs draw calls at trace level; used by the headless harness
#[derive(Debug, Default)]
pub struct TraceCanvas;

impl Canvas for TraceCanvas {
    fn clear(&mut self, color: Color) {
        tracing::trace!(color = color.as_str(), "clear");
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        tracing::trace!(
            x = center.x,
            y = center.y,
            radius,
            color = color.as_str(),
            "fill_circle"
        );
    }
}
