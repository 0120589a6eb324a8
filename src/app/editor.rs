//! Cursor movement and typing for the demo editor.
//!
//! The editor owns nothing but the cursor position; every edit goes straight
//! to the grid it is handed. Rows above `first_row` belong to the marquee
//! and are never entered.

use textui_config::Color;

use crate::blink::SharedCursor;
use crate::grid::CellGrid;
use crate::input::{Key, KeyboardListener, PointerEvent, PointerListener};
use crate::mapper::CellPos;

/// Editor state shared by its pointer and keyboard listeners.
///
/// Clones share one cursor, so the same editor can be registered for both
/// kinds of input.
#[derive(Debug, Clone)]
pub struct Editor {
    cursor: SharedCursor,
    first_row: i32,
    cols: i32,
    rows: i32,
}

impl Editor {
    /// Place the cursor at column 0 of `first_row`.
    pub fn new(cursor: SharedCursor, first_row: u32, cols: u32, rows: u32) -> Self {
        let first_row = first_row.min(rows.saturating_sub(1)) as i32;
        cursor.set(CellPos::new(0, first_row));
        Self {
            cursor,
            first_row,
            cols: cols as i32,
            rows: rows as i32,
        }
    }

    pub fn cursor(&self) -> CellPos {
        self.cursor.get()
    }

    pub fn shared_cursor(&self) -> &SharedCursor {
        &self.cursor
    }

    /// Turn the blink off at the current cell and move to `to`.
    fn relocate(&self, grid: &mut CellGrid, to: CellPos) {
        let from = self.cursor.get();
        grid.clear_cursor(from.col, from.row);
        self.cursor.set(to);
    }

    pub fn move_up(&self, grid: &mut CellGrid) -> bool {
        let pos = self.cursor.get();
        if pos.row <= self.first_row {
            return false;
        }
        self.relocate(grid, CellPos::new(pos.col, pos.row - 1));
        true
    }

    pub fn move_down(&self, grid: &mut CellGrid) -> bool {
        let pos = self.cursor.get();
        if pos.row >= self.rows - 1 {
            return false;
        }
        self.relocate(grid, CellPos::new(pos.col, pos.row + 1));
        true
    }

    /// Move left, wrapping to the end of the previous line.
    pub fn move_left(&self, grid: &mut CellGrid) -> bool {
        let pos = self.cursor.get();
        if pos.col > 0 {
            self.relocate(grid, CellPos::new(pos.col - 1, pos.row));
        } else if pos.row > self.first_row {
            self.relocate(grid, CellPos::new(self.cols - 1, pos.row - 1));
        } else {
            return false;
        }
        true
    }

    /// Move right, wrapping to the start of the next line.
    pub fn move_right(&self, grid: &mut CellGrid) -> bool {
        let pos = self.cursor.get();
        if pos.col < self.cols - 1 {
            self.relocate(grid, CellPos::new(pos.col + 1, pos.row));
        } else if pos.row < self.rows - 1 {
            self.relocate(grid, CellPos::new(0, pos.row + 1));
        } else {
            return false;
        }
        true
    }

    /// Move to column 0 of the next line; stays put on the last line.
    pub fn newline(&self, grid: &mut CellGrid) -> bool {
        let pos = self.cursor.get();
        if pos.row >= self.rows - 1 {
            return false;
        }
        self.relocate(grid, CellPos::new(0, pos.row + 1));
        true
    }

    /// Write `ch` under the cursor and advance. Control characters are ignored.
    pub fn type_char(&self, grid: &mut CellGrid, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        let pos = self.cursor.get();
        grid.clear_cursor(pos.col, pos.row);
        grid.set_char(pos.col, pos.row, ch);
        self.move_right(grid);
        true
    }

    /// Move the cursor to a clicked cell inside the editable area.
    pub fn click(&self, grid: &mut CellGrid, pos: CellPos) -> bool {
        if !grid.in_bounds(pos.col, pos.row) || pos.row < self.first_row {
            log::trace!("Ignoring click outside editor at ({}, {})", pos.col, pos.row);
            return false;
        }
        self.relocate(grid, pos);
        true
    }

    /// New text foreground; also recolors the cell under the cursor.
    pub fn set_text_foreground(&self, grid: &mut CellGrid, color: Color) {
        let pos = self.cursor.get();
        grid.set_text_foreground(color);
        grid.set_foreground(pos.col, pos.row, color);
    }

    /// New text background; also recolors the cell under the cursor.
    pub fn set_text_background(&self, grid: &mut CellGrid, color: Color) {
        let pos = self.cursor.get();
        grid.set_text_background(color);
        grid.set_background(pos.col, pos.row, color);
    }
}

impl PointerListener for Editor {
    fn on_click(&mut self, grid: &mut CellGrid, _event: &PointerEvent, pos: CellPos) {
        self.click(grid, pos);
    }
}

impl KeyboardListener for Editor {
    fn on_key_down(&mut self, grid: &mut CellGrid, key: Key) {
        match key {
            Key::ArrowUp => self.move_up(grid),
            Key::ArrowDown => self.move_down(grid),
            Key::ArrowLeft => self.move_left(grid),
            Key::ArrowRight => self.move_right(grid),
            Key::Enter => self.newline(grid),
            _ => false,
        };
    }

    fn on_key_typed(&mut self, grid: &mut CellGrid, ch: char) {
        self.type_char(grid, ch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(cols: u32, rows: u32) -> (Editor, CellGrid) {
        let editor = Editor::new(SharedCursor::default(), 2, cols, rows);
        (editor, CellGrid::new(cols, rows).unwrap())
    }

    #[test]
    fn test_cursor_starts_at_first_row() {
        let (editor, _) = setup(10, 5);
        assert_eq!(editor.cursor(), CellPos::new(0, 2));
    }

    #[test]
    fn test_first_row_is_clamped_on_short_grid() {
        let (editor, _) = setup(10, 1);
        assert_eq!(editor.cursor(), CellPos::new(0, 0));
        let (editor, _) = setup(10, 2);
        assert_eq!(editor.cursor(), CellPos::new(0, 1));
    }

    #[test]
    fn test_cannot_move_above_first_row() {
        let (editor, mut grid) = setup(10, 5);
        assert!(!editor.move_up(&mut grid));
        assert!(!editor.move_left(&mut grid));
        assert_eq!(editor.cursor(), CellPos::new(0, 2));
    }

    #[test]
    fn test_right_wraps_to_next_line_and_left_wraps_back() {
        let (editor, mut grid) = setup(3, 5);
        for _ in 0..3 {
            assert!(editor.move_right(&mut grid));
        }
        assert_eq!(editor.cursor(), CellPos::new(0, 3));
        assert!(editor.move_left(&mut grid));
        assert_eq!(editor.cursor(), CellPos::new(2, 2));
    }

    #[test]
    fn test_right_stops_at_last_cell() {
        let (editor, mut grid) = setup(2, 3);
        editor.move_right(&mut grid);
        assert_eq!(editor.cursor(), CellPos::new(1, 2));
        assert!(!editor.move_right(&mut grid));
        assert!(!editor.move_down(&mut grid));
    }

    #[test]
    fn test_moving_clears_blink_at_old_cell() {
        let (editor, mut grid) = setup(10, 5);
        grid.toggle_cursor(0, 2);
        editor.move_down(&mut grid);
        assert_eq!(grid.read_cursor(0, 2), Ok(false));
        assert_eq!(editor.cursor(), CellPos::new(0, 3));
    }

    #[test]
    fn test_typing_writes_and_advances() {
        let (editor, mut grid) = setup(10, 5);
        grid.toggle_cursor(0, 2);
        for ch in "hi".chars() {
            editor.type_char(&mut grid, ch);
        }
        assert_eq!(grid.row_text(2).unwrap(), "hi        ");
        assert_eq!(grid.read_cursor(0, 2), Ok(false));
        assert_eq!(editor.cursor(), CellPos::new(2, 2));
    }

    #[test]
    fn test_control_characters_are_not_typed() {
        let (editor, mut grid) = setup(10, 5);
        assert!(!editor.type_char(&mut grid, '\u{8}'));
        assert_eq!(grid.get_char(0, 2), Ok(' '));
        assert_eq!(editor.cursor(), CellPos::new(0, 2));
    }

    #[test]
    fn test_newline_goes_to_column_zero() {
        let (editor, mut grid) = setup(10, 5);
        editor.type_char(&mut grid, 'a');
        editor.newline(&mut grid);
        assert_eq!(editor.cursor(), CellPos::new(0, 3));
    }

    #[test]
    fn test_click_outside_editable_area_is_ignored() {
        let (editor, mut grid) = setup(10, 5);
        assert!(!editor.click(&mut grid, CellPos::new(3, 0)));
        assert!(!editor.click(&mut grid, CellPos::new(10, 3)));
        assert!(!editor.click(&mut grid, CellPos::new(-1, 3)));
        assert!(editor.click(&mut grid, CellPos::new(4, 4)));
        assert_eq!(editor.cursor(), CellPos::new(4, 4));
    }

    #[test]
    fn test_text_color_applies_to_cursor_cell_and_future_chars() {
        let (editor, mut grid) = setup(10, 5);
        let red = Color::rgb(255, 0, 0);
        editor.set_text_foreground(&mut grid, red);
        assert_eq!(grid.get_foreground(0, 2), Ok(red));
        editor.type_char(&mut grid, 'x');
        editor.type_char(&mut grid, 'y');
        assert_eq!(grid.get_foreground(1, 2), Ok(red));
    }

    #[test]
    fn test_clones_share_cursor() {
        let (editor, mut grid) = setup(10, 5);
        let mut keyboard = editor.clone();
        keyboard.on_key_down(&mut grid, Key::ArrowRight);
        assert_eq!(editor.cursor(), CellPos::new(1, 2));
    }
}
