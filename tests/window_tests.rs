//! Window facade: rendering, input routing and the UI queue.

mod common;

use common::{DrawOp, RecordingCanvas, recording_window};
use textui::{
    CellGrid, CellPos, Color, KeyboardEvent, KeyboardListener, PixelRect, PointerEvent,
    PointerEventKind, PointerListener, TextUiWindow,
};

#[test]
fn test_hello_end_to_end() {
    let mut window = recording_window(10, 5);
    window.grid_mut().print_text(0, 0, "Hello");
    window.repaint();

    assert_eq!(window.grid().row_text(0).unwrap(), "Hello     ");
    for col in 0..10 {
        assert_eq!(window.grid().get_foreground(col, 0), Ok(Color::WHITE));
        assert_eq!(window.grid().get_background(col, 0), Ok(Color::BLACK));
    }

    let canvas = window.canvas();
    assert_eq!(canvas.fills().len(), 50);
    let glyphs = canvas.glyphs();
    assert_eq!(glyphs.len(), 50);

    // First row, in paint order: pen x = gap/2 + col * stride, baseline = ascent
    let row0: String = glyphs.iter().take(10).map(|g| g.0).collect();
    assert_eq!(row0, "Hello     ");
    assert_eq!(glyphs[0], ('H', 0, 12, Color::WHITE));
    assert_eq!(glyphs[4], ('o', 36, 12, Color::WHITE));
    assert_eq!(glyphs[10].2, 28);
}

#[test]
fn test_background_is_painted_before_glyph() {
    let mut window = recording_window(1, 1);
    window.grid_mut().set_char(0, 0, 'x');
    window.repaint();

    let ops = &window.canvas().ops;
    assert_eq!(ops.len(), 2);
    assert_eq!(ops[0], DrawOp::Fill(PixelRect::new(0, 0, 9, 16), Color::BLACK));
    assert!(matches!(ops[1], DrawOp::Glyph { ch: 'x', .. }));
}

#[test]
fn test_blinking_cell_uses_blink_colors() {
    let mut window = recording_window(2, 1);
    let grid = window.grid_mut();
    grid.set_char(1, 0, 'b');
    grid.toggle_cursor(1, 0);
    window.repaint();

    let fills = window.canvas().fills();
    assert_eq!(fills[0].1, Color::BLACK);
    assert_eq!(fills[1], (PixelRect::new(9, 0, 9, 16), Color::WHITE));
    assert_eq!(window.canvas().glyphs()[1], ('b', 9, 12, Color::BLACK));
}

#[test]
fn test_preferred_size() {
    let window = recording_window(40, 24);
    assert_eq!(window.preferred_width(), 40 * 9);
    assert_eq!(window.preferred_height(), 24 * 16);
}

#[test]
fn test_invalid_dimensions_fail_construction() {
    let result = TextUiWindow::with_canvas(
        3,
        0,
        common::test_metrics(),
        RecordingCanvas::default(),
    );
    assert!(result.is_err());
}

struct Painter {
    color: Color,
}

impl PointerListener for Painter {
    fn on_press(&mut self, grid: &mut CellGrid, _event: &PointerEvent, pos: CellPos) {
        grid.set_background(pos.col, pos.row, self.color);
    }
}

impl KeyboardListener for Painter {
    fn on_key_typed(&mut self, grid: &mut CellGrid, ch: char) {
        grid.print_text(0, 0, &ch.to_string());
    }
}

#[test]
fn test_pointer_press_routes_to_mapped_cell() {
    let mut window = recording_window(10, 5);
    let red = Color::rgb(255, 0, 0);
    window.add_pointer_listener(Box::new(Painter { color: red }));

    let event = PointerEvent::new(PointerEventKind::Press, 9 * 3 + 4, 16 * 2 + 15);
    assert_eq!(window.handle_pointer(&event), 1);
    assert_eq!(window.grid().get_background(3, 2), Ok(red));

    let report = window.pump();
    assert!(report.repainted);
}

#[test]
fn test_pointer_outside_grid_reaches_listener_but_changes_nothing() {
    let mut window = recording_window(4, 4);
    window.add_pointer_listener(Box::new(Painter {
        color: Color::rgb(1, 1, 1),
    }));
    let before = window.grid().cells().to_vec();

    let event = PointerEvent::new(PointerEventKind::Press, -5, 1000);
    assert_eq!(window.handle_pointer(&event), 1);
    assert_eq!(window.grid().cells(), before.as_slice());
}

#[test]
fn test_each_listener_called_once_per_event() {
    let mut window = recording_window(4, 1);
    window.add_keyboard_listener(Box::new(Painter { color: Color::WHITE }));
    let second = window.add_keyboard_listener(Box::new(Painter { color: Color::WHITE }));

    assert_eq!(window.handle_keyboard(&KeyboardEvent::Typed('z')), 2);
    assert!(window.remove_keyboard_listener(second));
    assert!(!window.remove_keyboard_listener(second));
    assert_eq!(window.handle_keyboard(&KeyboardEvent::Typed('y')), 1);
    assert_eq!(window.grid().get_char(0, 0), Ok('y'));
}

#[test]
fn test_queued_mutation_from_other_thread_is_rendered() {
    let mut window = recording_window(6, 2);
    let handle = window.handle();
    std::thread::spawn(move || {
        handle
            .mutate_and_repaint(|grid| {
                grid.print_text(1, 1, "abc");
            })
            .unwrap();
    })
    .join()
    .unwrap();

    let report = window.pump();
    assert_eq!(report.mutations, 1);
    assert!(report.repainted);
    assert_eq!(window.grid().row_text(1).unwrap(), " abc  ");
    assert!(window.canvas().glyphs().iter().any(|g| g.0 == 'c'));
}
