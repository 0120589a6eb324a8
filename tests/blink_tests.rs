//! Cursor blink driver against a UI thread reading through the queue.

mod common;

use std::time::Duration;

use common::{recording_window, wait_until};
use textui::{BlinkDriver, CellPos, SharedCursor};

#[test]
fn test_blink_flag_parity_matches_applied_toggles() {
    let mut window = recording_window(10, 10);
    let cursor = SharedCursor::new(CellPos::new(5, 5));
    let task = BlinkDriver::spawn(window.handle(), cursor, Duration::from_millis(2)).unwrap();

    let mut toggles = 0usize;
    let mut observed_on = false;
    let mut observed_off = false;
    let reached = wait_until(Duration::from_secs(10), || {
        toggles += window.pump_timeout(Duration::from_millis(20)).mutations;
        let on = window.grid().read_cursor(5, 5).unwrap();
        assert_eq!(on, toggles % 2 == 1, "flag out of step after {toggles} toggles");
        observed_on |= on;
        observed_off |= !on && toggles > 0;
        toggles >= 6
    });
    task.shutdown().unwrap();

    toggles += window.pump().mutations;
    assert!(reached);
    assert!(observed_on && observed_off);
    assert_eq!(window.grid().read_cursor(5, 5), Ok(toggles % 2 == 1));

    // Nothing else in the grid blinked
    let lit = window.grid().cells().iter().filter(|c| c.cursor_on).count();
    assert!(lit <= 1);
}

#[test]
fn test_blink_reads_cursor_when_applied() {
    let mut window = recording_window(4, 4);
    let cursor = SharedCursor::new(CellPos::new(0, 0));
    let task =
        BlinkDriver::spawn(window.handle(), cursor.clone(), Duration::from_millis(2)).unwrap();

    // Moved before the UI thread applies anything: every toggle lands on (3,3)
    cursor.set(CellPos::new(3, 3));
    let mut toggles = 0;
    assert!(wait_until(Duration::from_secs(10), || {
        toggles += window.pump_timeout(Duration::from_millis(20)).mutations;
        toggles > 0
    }));
    task.shutdown().unwrap();
    toggles += window.pump().mutations;

    assert_eq!(window.grid().read_cursor(0, 0), Ok(false));
    assert_eq!(window.grid().read_cursor(3, 3), Ok(toggles % 2 == 1));
}

#[test]
fn test_shutdown_returns_promptly_with_long_interval() {
    let window = recording_window(2, 2);
    let task = BlinkDriver::spawn(
        window.handle(),
        SharedCursor::default(),
        Duration::from_secs(600),
    )
    .unwrap();
    let start = std::time::Instant::now();
    task.shutdown().unwrap();
    assert!(start.elapsed() < Duration::from_secs(5));
}
