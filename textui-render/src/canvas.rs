use textui_config::Color;

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Drawing surface the renderer paints onto.
///
/// Implementations must be driven from a single thread (the UI thread); the
/// renderer never shares a canvas.
pub trait Canvas {
    /// Surface size in pixels.
    fn size(&self) -> (u32, u32);

    /// Fill `rect` with `color`, clipped to the surface.
    fn fill_rect(&mut self, rect: PixelRect, color: Color);

    /// Draw one character with its pen at `pen_x` on the baseline `baseline_y`.
    fn draw_glyph(&mut self, ch: char, pen_x: i32, baseline_y: i32, color: Color);
}

