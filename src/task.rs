//! Cancellable background threads that are joined before their owner goes away.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use parking_lot::{Condvar, Mutex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("task '{name}' panicked")]
    Panicked { name: String },
}

#[derive(Debug, Default)]
struct TokenState {
    cancelled: Mutex<bool>,
    signal: Condvar,
}

/// Shared cancellation flag with a wakeable wait.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    state: Arc<TokenState>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        let mut cancelled = self.state.cancelled.lock();
        *cancelled = true;
        self.state.signal.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self.state.cancelled.lock()
    }

    /// Sleep for up to `timeout`, returning early on cancellation.
    ///
    /// Returns `true` if the token was cancelled.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut cancelled = self.state.cancelled.lock();
        while !*cancelled {
            if self
                .state
                .signal
                .wait_until(&mut cancelled, deadline)
                .timed_out()
            {
                break;
            }
        }
        *cancelled
    }
}

/// A named worker thread with a cancellation token.
///
/// Dropping the task cancels it and joins the thread.
#[derive(Debug)]
pub struct ScopedTask {
    name: String,
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl ScopedTask {
    pub fn spawn<F>(name: impl Into<String>, body: F) -> Result<Self>
    where
        F: FnOnce(CancellationToken) + Send + 'static,
    {
        let name = name.into();
        let token = CancellationToken::new();
        let worker_token = token.clone();
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || body(worker_token))
            .with_context(|| format!("Failed to spawn task thread '{}'", name))?;
        log::debug!("Task '{}' started", name);
        Ok(Self {
            name,
            token,
            handle: Some(handle),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }

    /// Cancel the task and wait for its thread to exit.
    pub fn shutdown(mut self) -> Result<(), TaskError> {
        self.join_inner()
    }

    fn join_inner(&mut self) -> Result<(), TaskError> {
        self.token.cancel();
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        match handle.join() {
            Ok(()) => {
                log::debug!("Task '{}' joined", self.name);
                Ok(())
            }
            Err(_) => Err(TaskError::Panicked {
                name: self.name.clone(),
            }),
        }
    }
}

impl Drop for ScopedTask {
    fn drop(&mut self) {
        if let Err(e) = self.join_inner() {
            log::error!("{}", e);
        }
    }
}

/// Tasks torn down together: every token is cancelled before any join.
#[derive(Debug, Default)]
pub struct TaskSet {
    tasks: Vec<ScopedTask>,
}

impl TaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, task: ScopedTask) {
        self.tasks.push(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Cancel all, then join each. Returns the first panic, if any.
    pub fn shutdown(&mut self) -> Result<(), TaskError> {
        for task in &self.tasks {
            task.cancel();
        }
        let mut first_err = None;
        for task in self.tasks.drain(..) {
            if let Err(e) = task.shutdown() {
                log::error!("{}", e);
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

impl Drop for TaskSet {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}
