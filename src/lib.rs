//! textui: a character-grid text display painted onto a pixel canvas.
//!
//! [`TextUiWindow`] owns a [`CellGrid`] and repaints it through a
//! [`Renderer`](textui_render::Renderer). Pointer and keyboard events are
//! mapped to cells and routed to listeners; background tasks such as the
//! cursor blink post grid mutations through a [`UiHandle`].
//!
//! # Threading
//!
//! The window and its grid belong to one thread. Other threads hold only a
//! cloneable [`UiHandle`]; their closures run when the owner calls
//! [`TextUiWindow::pump`]. Background work runs on [`ScopedTask`]s that are
//! cancelled and joined before the window is dropped.

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod debug;

pub mod app;
pub mod blink;
pub mod cli;
pub mod grid;
pub mod input;
pub mod mapper;
pub mod task;
pub mod ui_queue;
pub mod window;

pub use blink::{BlinkDriver, SharedCursor};
pub use grid::{CellGrid, GridError};
pub use input::{
    InputDispatcher, Key, KeyboardEvent, KeyboardListener, ListenerHandle, PointerEvent,
    PointerEventKind, PointerListener,
};
pub use mapper::{CellPos, CoordinateMapper};
pub use task::{CancellationToken, ScopedTask, TaskError, TaskSet};
pub use ui_queue::{DrainOutcome, UiClosed, UiHandle, UiQueue, UiRequest, ui_channel};
pub use window::{PumpReport, TextUiWindow, WindowSettings};

pub use textui_config::{Cell, Color, Config, ConfigError};
pub use textui_fonts::CellMetrics;
pub use textui_render::{Canvas, PixelRect, PixmapCanvas};
