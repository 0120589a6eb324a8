//! Default values for every configuration setting.

use crate::color::Color;

/// Character every cell holds until written.
pub const DEFAULT_CHAR: char = ' ';

/// Smallest accepted grid width/height, in cells.
pub const MINIMUM_GRID_DIMENSION: u32 = 1;

/// Smallest accepted font size, in points.
pub const MINIMUM_FONT_SIZE: u32 = 1;

// Grid
pub fn cols() -> u32 {
    40
}

pub fn rows() -> u32 {
    24
}

// Font
pub fn font_family() -> String {
    "DejaVu Sans Mono".to_string()
}

pub fn font_size() -> u32 {
    17
}

pub fn font_bold() -> bool {
    true
}

pub fn char_gap() -> i32 {
    1 // Horizontal pixels between adjacent cells
}

// Colors
pub fn text_foreground() -> Color {
    Color::WHITE
}

pub fn text_background() -> Color {
    Color::BLACK
}

pub fn blink_foreground() -> Color {
    Color::BLACK
}

pub fn blink_background() -> Color {
    Color::WHITE
}

// Timers
pub fn cursor_blink_interval_ms() -> u64 {
    600
}

pub fn marquee_interval_ms() -> u64 {
    400
}

// Demo editor
pub fn marquee_text() -> String {
    "Hello, world! ".to_string()
}

pub fn editor_first_row() -> u32 {
    2 // Rows above this are reserved for the marquee
}
