//! CPU framebuffer canvas.

use std::path::Path;

use textui_config::Color;
use textui_fonts::GlyphRasterizer;

use crate::canvas::{Canvas, PixelRect};
use crate::error::RenderError;

/// RGBA framebuffer implementing [`Canvas`].
///
/// Glyphs are drawn only when a [`GlyphRasterizer`] is attached; without one
/// the canvas paints cell backgrounds only, which is enough for headless
/// geometry checks.
#[derive(Debug)]
pub struct PixmapCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    rasterizer: Option<GlyphRasterizer>,
}

impl PixmapCanvas {
    /// Create a transparent-black canvas.
    pub fn new(width: u32, height: u32, rasterizer: Option<GlyphRasterizer>) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
            rasterizer,
        }
    }

    /// Color at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let idx = self.offset(x as i32, y as i32)?;
        Some(Color::new(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ))
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    /// Copy the framebuffer into an `image` buffer.
    pub fn to_image(&self) -> Result<image::RgbaImage, RenderError> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone()).ok_or(
            RenderError::InvalidFramebuffer {
                expected: self.width as usize * self.height as usize * 4,
                actual: self.pixels.len(),
            },
        )
    }

    /// Encode the framebuffer as PNG at `path`.
    pub fn save_png(&self, path: &Path) -> Result<(), RenderError> {
        let image = self.to_image()?;
        image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|source| RenderError::ScreenshotSave {
                path: path.display().to_string(),
                source,
            })?;
        log::info!(
            "Saved {}x{} screenshot to {}",
            self.width,
            self.height,
            path.display()
        );
        Ok(())
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }

    /// Source-over blend of `color` scaled by `coverage` into the pixel at `idx`.
    fn blend(&mut self, idx: usize, color: Color, coverage: u8) {
        let alpha = color.a as u32 * coverage as u32 / 255;
        if alpha == 0 {
            return;
        }
        let dst = &mut self.pixels[idx..idx + 4];
        if alpha == 255 {
            dst.copy_from_slice(&[color.r, color.g, color.b, 255]);
            return;
        }
        let inv = 255 - alpha;
        dst[0] = ((color.r as u32 * alpha + dst[0] as u32 * inv) / 255) as u8;
        dst[1] = ((color.g as u32 * alpha + dst[1] as u32 * inv) / 255) as u8;
        dst[2] = ((color.b as u32 * alpha + dst[2] as u32 * inv) / 255) as u8;
        dst[3] = (alpha + dst[3] as u32 * inv / 255) as u8;
    }
}

impl Canvas for PixmapCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = (rect.x + rect.width as i32).min(self.width as i32);
        let y1 = (rect.y + rect.height as i32).min(self.height as i32);
        for y in y0..y1 {
            for x in x0..x1 {
                if let Some(idx) = self.offset(x, y) {
                    self.blend(idx, color, 255);
                }
            }
        }
    }

    fn draw_glyph(&mut self, ch: char, pen_x: i32, baseline_y: i32, color: Color) {
        let Some(mask) = self.rasterizer.as_mut().and_then(|r| r.rasterize(ch)) else {
            return;
        };
        let origin_x = pen_x + mask.left;
        let origin_y = baseline_y - mask.top;
        for row in 0..mask.height {
            for col in 0..mask.width {
                let coverage = mask.alpha[(row * mask.width + col) as usize];
                if coverage == 0 {
                    continue;
                }
                if let Some(idx) = self.offset(origin_x + col as i32, origin_y + row as i32) {
                    self.blend(idx, color, coverage);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_is_transparent() {
        let canvas = PixmapCanvas::new(4, 3, None);
        assert_eq!(canvas.size(), (4, 3));
        assert_eq!(canvas.as_rgba().len(), 4 * 3 * 4);
        assert_eq!(canvas.pixel(3, 2), Some(Color::new(0, 0, 0, 0)));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn test_fill_rect_clips_to_surface() {
        let mut canvas = PixmapCanvas::new(4, 4, None);
        canvas.fill_rect(PixelRect::new(-2, 2, 4, 10), Color::rgb(255, 0, 0));
        assert_eq!(canvas.pixel(0, 2), Some(Color::rgb(255, 0, 0)));
        assert_eq!(canvas.pixel(1, 3), Some(Color::rgb(255, 0, 0)));
        assert_eq!(canvas.pixel(2, 2), Some(Color::new(0, 0, 0, 0)));
        assert_eq!(canvas.pixel(0, 1), Some(Color::new(0, 0, 0, 0)));
    }

    #[test]
    fn test_translucent_fill_blends() {
        let mut canvas = PixmapCanvas::new(1, 1, None);
        canvas.fill_rect(PixelRect::new(0, 0, 1, 1), Color::WHITE);
        canvas.fill_rect(PixelRect::new(0, 0, 1, 1), Color::new(0, 0, 0, 128));
        let px = canvas.pixel(0, 0).unwrap();
        assert!(px.r > 120 && px.r < 135);
        assert_eq!(px.a, 255);
    }

    #[test]
    fn test_draw_glyph_without_rasterizer_is_noop() {
        let mut canvas = PixmapCanvas::new(8, 8, None);
        canvas.draw_glyph('A', 0, 6, Color::WHITE);
        assert!(canvas.as_rgba().iter().all(|&b| b == 0));
    }
}
