use crate::color::Color;
use crate::defaults;

/// A single grid cell: one character with its colors and blink-cursor flag
///
/// This is the unit shared between the grid store (which owns and mutates
/// cells) and the renderer (which paints them).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg_color: Color,
    pub bg_color: Color,
    /// When set, the renderer swaps in the blink-cursor colors for this cell
    pub cursor_on: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: defaults::DEFAULT_CHAR,
            fg_color: defaults::text_foreground(),
            bg_color: defaults::text_background(),
            cursor_on: false,
        }
    }
}
