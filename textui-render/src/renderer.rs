//! Full-grid and single-cell repaint.
//!
//! Every `repaint` redraws the whole surface: background rectangle first,
//! then the glyph, cell by cell. There is no dirty tracking; callers batch
//! their mutations and repaint once.

use textui_config::{Cell, Color};
use textui_fonts::CellMetrics;

use crate::canvas::{Canvas, PixelRect};

/// Read-only view of a grid for one repaint.
#[derive(Debug, Clone, Copy)]
pub struct GridFrame<'a> {
    pub cols: u32,
    pub rows: u32,
    /// Row-major cells, `cols * rows` long
    pub cells: &'a [Cell],
    /// Glyph color used where a cell's blink flag is on
    pub blink_foreground: Color,
    /// Fill color used where a cell's blink flag is on
    pub blink_background: Color,
}

impl GridFrame<'_> {
    fn cell(&self, col: u32, row: u32) -> Option<&Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get((row * self.cols + col) as usize)
    }
}

/// Paints grid cells onto a [`Canvas`] using fixed cell metrics.
#[derive(Debug, Clone)]
pub struct Renderer {
    metrics: CellMetrics,
}

impl Renderer {
    pub fn new(metrics: CellMetrics) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    /// Redraw every cell of `frame`.
    pub fn repaint(&self, canvas: &mut dyn Canvas, frame: &GridFrame<'_>) {
        for row in 0..frame.rows {
            for col in 0..frame.cols {
                self.repaint_cell(canvas, frame, col, row);
            }
        }
        log::trace!("Repainted {}x{} grid", frame.cols, frame.rows);
    }

    /// Redraw the single cell at `(col, row)`; out-of-range cells are skipped.
    pub fn repaint_cell(&self, canvas: &mut dyn Canvas, frame: &GridFrame<'_>, col: u32, row: u32) {
        let Some(cell) = frame.cell(col, row) else {
            return;
        };
        let (fg, bg) = if cell.cursor_on {
            (frame.blink_foreground, frame.blink_background)
        } else {
            (cell.fg_color, cell.bg_color)
        };

        canvas.fill_rect(self.cell_rect(col, row), bg);

        let stride = self.metrics.cell_stride() as i32;
        let pen_x = (self.metrics.char_gap / 2) as i32 + stride * col as i32;
        let baseline_y = (self.metrics.cell_height * row + self.metrics.ascent) as i32;
        canvas.draw_glyph(cell.ch, pen_x, baseline_y, fg);
    }

    /// Pixel rectangle covered by the cell at `(col, row)`, gap included.
    pub fn cell_rect(&self, col: u32, row: u32) -> PixelRect {
        PixelRect::new(
            (col * self.metrics.cell_stride()) as i32,
            (row * self.metrics.cell_height) as i32,
            self.metrics.cell_stride(),
            self.metrics.cell_height,
        )
    }
}
