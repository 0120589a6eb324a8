//! Channel carrying grid mutations from background tasks to the UI thread.
//!
//! Only the UI thread owns the [`CellGrid`]. Workers hold a cloneable
//! [`UiHandle`] and post closures; the owner applies them in arrival order
//! when it drains the [`UiQueue`].

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

use thiserror::Error;

use crate::grid::CellGrid;

/// Deferred edit applied to the grid on the UI thread
pub type Mutation = Box<dyn FnOnce(&mut CellGrid) + Send + 'static>;

pub enum UiRequest {
    Mutate(Mutation),
    Repaint,
}

impl std::fmt::Debug for UiRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UiRequest::Mutate(_) => f.write_str("Mutate(..)"),
            UiRequest::Repaint => f.write_str("Repaint"),
        }
    }
}

/// The receiving side of the queue has been dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("UI queue is closed")]
pub struct UiClosed;

/// Sending half, cloned into every background task.
#[derive(Clone, Debug)]
pub struct UiHandle {
    tx: Sender<UiRequest>,
}

impl UiHandle {
    pub fn send(&self, request: UiRequest) -> Result<(), UiClosed> {
        self.tx.send(request).map_err(|_| UiClosed)
    }

    pub fn mutate<F>(&self, f: F) -> Result<(), UiClosed>
    where
        F: FnOnce(&mut CellGrid) + Send + 'static,
    {
        self.send(UiRequest::Mutate(Box::new(f)))
    }

    pub fn request_repaint(&self) -> Result<(), UiClosed> {
        self.send(UiRequest::Repaint)
    }

    /// Post a mutation followed by a repaint request.
    pub fn mutate_and_repaint<F>(&self, f: F) -> Result<(), UiClosed>
    where
        F: FnOnce(&mut CellGrid) + Send + 'static,
    {
        self.mutate(f)?;
        self.request_repaint()
    }
}

/// Summary of one drain pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainOutcome {
    pub mutations: usize,
    pub repaint_requested: bool,
}

impl DrainOutcome {
    pub fn is_empty(&self) -> bool {
        self.mutations == 0 && !self.repaint_requested
    }

    fn apply(&mut self, request: UiRequest, grid: &mut CellGrid) {
        match request {
            UiRequest::Mutate(f) => {
                f(grid);
                self.mutations += 1;
            }
            UiRequest::Repaint => self.repaint_requested = true,
        }
    }
}

/// Receiving half, owned by the UI thread.
#[derive(Debug)]
pub struct UiQueue {
    rx: Receiver<UiRequest>,
}

impl UiQueue {
    /// Apply every pending request without blocking.
    pub fn drain(&self, grid: &mut CellGrid) -> DrainOutcome {
        let mut outcome = DrainOutcome::default();
        loop {
            match self.rx.try_recv() {
                Ok(request) => outcome.apply(request, grid),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        outcome
    }

    /// Wait up to `timeout` for the first request, then drain the rest.
    pub fn drain_timeout(&self, grid: &mut CellGrid, timeout: Duration) -> DrainOutcome {
        let mut outcome = DrainOutcome::default();
        match self.rx.recv_timeout(timeout) {
            Ok(request) => outcome.apply(request, grid),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                return outcome;
            }
        }
        let rest = self.drain(grid);
        outcome.mutations += rest.mutations;
        outcome.repaint_requested |= rest.repaint_requested;
        outcome
    }
}

/// Create a connected handle/queue pair.
pub fn ui_channel() -> (UiHandle, UiQueue) {
    let (tx, rx) = mpsc::channel();
    (UiHandle { tx }, UiQueue { rx })
}
