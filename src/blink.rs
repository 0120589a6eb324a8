//! Periodic cursor blink.
//!
//! The driver never touches the grid itself. Each tick it posts a mutation
//! that toggles the blink flag at whatever cell the cursor occupies when the
//! UI thread applies it, followed by a repaint request.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use parking_lot::Mutex;

use crate::mapper::CellPos;
use crate::task::ScopedTask;
use crate::ui_queue::UiHandle;

/// Cursor position shared between the editor and the blink driver.
#[derive(Debug, Clone, Default)]
pub struct SharedCursor(Arc<Mutex<CellPos>>);

impl SharedCursor {
    pub fn new(pos: CellPos) -> Self {
        Self(Arc::new(Mutex::new(pos)))
    }

    pub fn get(&self) -> CellPos {
        *self.0.lock()
    }

    pub fn set(&self, pos: CellPos) {
        *self.0.lock() = pos;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkPhase {
    On,
    Off,
}

impl BlinkPhase {
    fn next(self) -> Self {
        match self {
            BlinkPhase::On => BlinkPhase::Off,
            BlinkPhase::Off => BlinkPhase::On,
        }
    }
}

pub struct BlinkDriver;

impl BlinkDriver {
    /// Start blinking the cell under `cursor` every `interval`.
    ///
    /// The loop ends when the returned task is cancelled or the UI queue
    /// is closed.
    pub fn spawn(handle: UiHandle, cursor: SharedCursor, interval: Duration) -> Result<ScopedTask> {
        ScopedTask::spawn("cursor-blink", move |token| {
            let mut phase = BlinkPhase::Off;
            while !token.wait_timeout(interval) {
                phase = phase.next();
                let cursor = cursor.clone();
                let posted = handle.mutate_and_repaint(move |grid| {
                    let pos = cursor.get();
                    grid.toggle_cursor(pos.col, pos.row);
                });
                if posted.is_err() {
                    log::debug!("Cursor blink stopping: UI queue closed");
                    return;
                }
                log::trace!("Cursor blink tick ({:?})", phase);
            }
            log::debug!("Cursor blink cancelled");
        })
    }
}
