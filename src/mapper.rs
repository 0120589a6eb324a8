//! Pixel ↔ cell coordinate conversion.

use textui_fonts::CellMetrics;

/// A (column, row) pair. May lie outside the grid; check before indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellPos {
    pub col: i32,
    pub row: i32,
}

impl CellPos {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

/// Converts pointer pixels into grid cells using fixed cell metrics.
///
/// `column = x / (cell_width + gap)`, `row = (y - title_border) / cell_height`,
/// with floor division so points left of or above the grid map to negative
/// indices. A pixel exactly on a boundary belongs to the next cell.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper {
    metrics: CellMetrics,
    title_border_thickness: i32,
}

impl CoordinateMapper {
    pub fn new(metrics: CellMetrics) -> Self {
        Self {
            metrics,
            title_border_thickness: 0,
        }
    }

    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    pub fn title_border_thickness(&self) -> i32 {
        self.title_border_thickness
    }

    /// Height of the host window chrome above the grid. Re-supply when it changes.
    pub fn set_title_border_thickness(&mut self, thickness: i32) {
        self.title_border_thickness = thickness;
    }

    pub fn pixel_to_cell(&self, pixel_x: i32, pixel_y: i32) -> CellPos {
        let stride = self.metrics.cell_stride() as i32;
        let height = self.metrics.cell_height as i32;
        CellPos {
            col: pixel_x.div_euclid(stride),
            row: (pixel_y - self.title_border_thickness).div_euclid(height),
        }
    }

    /// Top-left pixel of `pos`, in the same space `pixel_to_cell` accepts.
    pub fn cell_origin(&self, pos: CellPos) -> (i32, i32) {
        (
            pos.col * self.metrics.cell_stride() as i32,
            pos.row * self.metrics.cell_height as i32 + self.title_border_thickness,
        )
    }
}
