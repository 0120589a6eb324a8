//! Cell metrics derived from a monospace font.
//!
//! Metrics are computed once when a grid is built and stay constant for its
//! lifetime; the grid never resizes its cells.

use crate::font_data::FontData;

/// Reference glyph whose advance defines the cell width.
const WIDTH_REFERENCE_CHAR: char = 'C';

/// Pixel geometry of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    /// Width of a glyph cell in pixels, excluding the gap
    pub cell_width: u32,
    /// Height of a cell (one line) in pixels
    pub cell_height: u32,
    /// Horizontal gap between adjacent cells in pixels
    pub char_gap: u32,
    /// Distance from the top of a cell to the glyph baseline
    pub ascent: u32,
}

impl CellMetrics {
    pub fn new(cell_width: u32, cell_height: u32, char_gap: u32, ascent: u32) -> Self {
        Self {
            cell_width: cell_width.max(1),
            cell_height: cell_height.max(1),
            char_gap,
            ascent: ascent.min(cell_height.max(1)),
        }
    }

    /// Horizontal distance between the left edges of two adjacent cells.
    pub fn cell_stride(&self) -> u32 {
        self.cell_width + self.char_gap
    }

    /// Pixel size a `cols × rows` grid needs, gap included horizontally.
    pub fn grid_pixel_size(&self, cols: u32, rows: u32) -> (u32, u32) {
        (cols * self.cell_stride(), rows * self.cell_height)
    }
}

/// Convert a font size in points to pixels per em.
///
/// Matches the platform convention: points are pixels on macOS (72 DPI),
/// elsewhere one point is 96/72 pixels.
pub fn font_size_to_pixels(font_size: u32, scale_factor: f32) -> f32 {
    let platform_dpi = if cfg!(target_os = "macos") {
        72.0
    } else {
        96.0
    };
    (font_size as f32 * platform_dpi / 72.0 * scale_factor).max(1.0)
}

/// Calculate cell metrics for `font` at `font_size_pixels`.
///
/// The cell width is the advance of `'C'`, the height the natural line height
/// (ascent + descent + leading), both rounded up to whole pixels.
pub fn calculate_cell_metrics(
    font: &FontData,
    font_size_pixels: f32,
    char_gap: u32,
) -> CellMetrics {
    let font_ref = font.font_ref();
    let metrics = font_ref.metrics(&[]);
    let scale = font_size_pixels / metrics.units_per_em as f32;

    let ascent = metrics.ascent * scale;
    let descent = metrics.descent.abs() * scale;
    let leading = metrics.leading * scale;

    let glyph_id = font_ref.charmap().map(WIDTH_REFERENCE_CHAR);
    let char_advance = font_ref.glyph_metrics(&[]).advance_width(glyph_id) * scale;

    let cell_metrics = CellMetrics::new(
        char_advance.ceil() as u32,
        (ascent + descent + leading).ceil() as u32,
        char_gap,
        ascent.round() as u32,
    );
    log::info!(
        "Cell metrics: {}x{} (gap {}, ascent {}) at {:.1}px",
        cell_metrics.cell_width,
        cell_metrics.cell_height,
        cell_metrics.char_gap,
        cell_metrics.ascent,
        font_size_pixels
    );
    cell_metrics
}
