//! Shared integration test helpers for textui.
//!
//! Include with `mod common;` at the top of a test file. The
//! `#[allow(dead_code)]` attribute suppresses warnings when only a subset of
//! helpers are used per file.

#![allow(dead_code)]

use std::time::{Duration, Instant};

use textui::{Canvas, CellMetrics, Color, PixelRect, TextUiWindow};

/// Cell metrics used across tests: 8x16 cells, 1px gap, baseline at 12.
pub fn test_metrics() -> CellMetrics {
    CellMetrics::new(8, 16, 1, 12)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOp {
    Fill(PixelRect, Color),
    Glyph {
        ch: char,
        pen_x: i32,
        baseline_y: i32,
        color: Color,
    },
}

/// Canvas that records every draw call.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn glyphs(&self) -> Vec<(char, i32, i32, Color)> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                DrawOp::Glyph {
                    ch,
                    pen_x,
                    baseline_y,
                    color,
                } => Some((ch, pen_x, baseline_y, color)),
                DrawOp::Fill(..) => None,
            })
            .collect()
    }

    pub fn fills(&self) -> Vec<(PixelRect, Color)> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                DrawOp::Fill(rect, color) => Some((rect, color)),
                DrawOp::Glyph { .. } => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> (u32, u32) {
        (u32::MAX, u32::MAX)
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        self.ops.push(DrawOp::Fill(rect, color));
    }

    fn draw_glyph(&mut self, ch: char, pen_x: i32, baseline_y: i32, color: Color) {
        self.ops.push(DrawOp::Glyph {
            ch,
            pen_x,
            baseline_y,
            color,
        });
    }
}

/// A `cols × rows` window over a fresh recording canvas.
pub fn recording_window(cols: u32, rows: u32) -> TextUiWindow<RecordingCanvas> {
    TextUiWindow::with_canvas(cols, rows, test_metrics(), RecordingCanvas::default())
        .expect("Failed to create window")
}

/// Poll `condition` until it holds or `timeout` passes.
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
    condition()
}
