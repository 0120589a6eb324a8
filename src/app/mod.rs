//! The demo text editor built on [`TextUiWindow`](crate::window::TextUiWindow).

pub mod editor;
pub mod marquee;
pub mod session;

pub use editor::Editor;
pub use marquee::{Marquee, MarqueeText};
pub use session::{EditorSession, SessionOptions, SessionReport, run_headless};
