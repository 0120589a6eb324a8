//! Cell grid store.
//!
//! A fixed `cols × rows` array of [`Cell`]s plus the store-level colors:
//! the current *text* colors applied by [`CellGrid::set_char`] and the
//! *blink-cursor* colors the renderer uses for cells whose flag is on.
//!
//! Bounds policy: writes outside the grid are silently dropped (a string
//! running past the right edge is routine), reads outside the grid return
//! [`GridError::OutOfBounds`] because callers are expected to pre-validate.

use textui_config::{Cell, Color, ConfigError, defaults};
use textui_render::GridFrame;
use thiserror::Error;

/// Errors from grid read accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({col}, {row}) is outside the {cols}x{rows} grid")]
    OutOfBounds {
        col: i32,
        row: i32,
        cols: u32,
        rows: u32,
    },
}

/// Fixed-size grid of character cells.
#[derive(Debug, Clone)]
pub struct CellGrid {
    cols: u32,
    rows: u32,
    cells: Vec<Cell>,
    text_foreground: Color,
    text_background: Color,
    blink_foreground: Color,
    blink_background: Color,
}

impl CellGrid {
    /// Create a grid of blank cells. Both dimensions must be at least one.
    pub fn new(cols: u32, rows: u32) -> Result<Self, ConfigError> {
        if cols < defaults::MINIMUM_GRID_DIMENSION || rows < defaults::MINIMUM_GRID_DIMENSION {
            return Err(ConfigError::Validation(format!(
                "grid size {cols}x{rows} is invalid. Both dimensions must be at least {}",
                defaults::MINIMUM_GRID_DIMENSION
            )));
        }
        Ok(Self {
            cols,
            rows,
            cells: vec![Cell::default(); cols as usize * rows as usize],
            text_foreground: defaults::text_foreground(),
            text_background: defaults::text_background(),
            blink_foreground: defaults::blink_foreground(),
            blink_background: defaults::blink_background(),
        })
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn in_bounds(&self, col: i32, row: i32) -> bool {
        self.index(col, row).is_some()
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col as u32 >= self.cols || row as u32 >= self.rows {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    fn checked_index(&self, col: i32, row: i32) -> Result<usize, GridError> {
        self.index(col, row).ok_or(GridError::OutOfBounds {
            col,
            row,
            cols: self.cols,
            rows: self.rows,
        })
    }

    fn cell_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        let idx = self.index(col, row);
        if idx.is_none() {
            log::trace!("Dropped write to off-grid cell ({}, {})", col, row);
        }
        idx.map(|i| &mut self.cells[i])
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    // ========================================================================
    // Characters
    // ========================================================================

    /// Write `ch` at `(col, row)` and reset the cell to the current text colors.
    ///
    /// Returns `false` (and changes nothing) when the position is off-grid.
    pub fn set_char(&mut self, col: i32, row: i32, ch: char) -> bool {
        let (fg, bg) = (self.text_foreground, self.text_background);
        match self.cell_mut(col, row) {
            Some(cell) => {
                cell.ch = ch;
                cell.fg_color = fg;
                cell.bg_color = bg;
                true
            }
            None => false,
        }
    }

    pub fn get_char(&self, col: i32, row: i32) -> Result<char, GridError> {
        Ok(self.cells[self.checked_index(col, row)?].ch)
    }

    /// Write `text` left-to-right from `(col, row)`, clipping at both edges.
    ///
    /// Returns the number of characters actually written. An off-grid `row`
    /// makes the whole call a no-op.
    pub fn print_text(&mut self, col: i32, row: i32, text: &str) -> usize {
        if row < 0 || row as u32 >= self.rows {
            return 0;
        }
        let mut written = 0;
        for (offset, ch) in text.chars().enumerate() {
            let Some(target) = col.checked_add(offset as i32) else {
                break;
            };
            if target >= self.cols as i32 {
                break;
            }
            if self.set_char(target, row, ch) {
                written += 1;
            }
        }
        written
    }

    /// Characters of `row` as a string, one per column.
    pub fn row_text(&self, row: i32) -> Result<String, GridError> {
        let start = self.checked_index(0, row)?;
        Ok(self.cells[start..start + self.cols as usize]
            .iter()
            .map(|cell| cell.ch)
            .collect())
    }

    // ========================================================================
    // Cell colors
    // ========================================================================

    pub fn set_foreground(&mut self, col: i32, row: i32, color: Color) -> bool {
        self.cell_mut(col, row)
            .map(|cell| cell.fg_color = color)
            .is_some()
    }

    pub fn set_background(&mut self, col: i32, row: i32, color: Color) -> bool {
        self.cell_mut(col, row)
            .map(|cell| cell.bg_color = color)
            .is_some()
    }

    pub fn get_foreground(&self, col: i32, row: i32) -> Result<Color, GridError> {
        Ok(self.cells[self.checked_index(col, row)?].fg_color)
    }

    pub fn get_background(&self, col: i32, row: i32) -> Result<Color, GridError> {
        Ok(self.cells[self.checked_index(col, row)?].bg_color)
    }

    // ========================================================================
    // Blink cursor flags
    // ========================================================================

    pub fn toggle_cursor(&mut self, col: i32, row: i32) -> bool {
        self.cell_mut(col, row)
            .map(|cell| cell.cursor_on = !cell.cursor_on)
            .is_some()
    }

    pub fn clear_cursor(&mut self, col: i32, row: i32) -> bool {
        self.cell_mut(col, row)
            .map(|cell| cell.cursor_on = false)
            .is_some()
    }

    pub fn read_cursor(&self, col: i32, row: i32) -> Result<bool, GridError> {
        Ok(self.cells[self.checked_index(col, row)?].cursor_on)
    }

    // ========================================================================
    // Store-level colors
    // ========================================================================

    pub fn text_foreground(&self) -> Color {
        self.text_foreground
    }

    pub fn set_text_foreground(&mut self, color: Color) {
        self.text_foreground = color;
    }

    pub fn text_background(&self) -> Color {
        self.text_background
    }

    pub fn set_text_background(&mut self, color: Color) {
        self.text_background = color;
    }

    pub fn blink_foreground(&self) -> Color {
        self.blink_foreground
    }

    pub fn set_blink_foreground(&mut self, color: Color) {
        self.blink_foreground = color;
    }

    pub fn blink_background(&self) -> Color {
        self.blink_background
    }

    pub fn set_blink_background(&mut self, color: Color) {
        self.blink_background = color;
    }

    /// Borrowed snapshot handed to the renderer.
    pub fn frame(&self) -> GridFrame<'_> {
        GridFrame {
            cols: self.cols,
            rows: self.rows,
            cells: &self.cells,
            blink_foreground: self.blink_foreground,
            blink_background: self.blink_background,
        }
    }
}
