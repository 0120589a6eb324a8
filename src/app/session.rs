//! Demo editor session: window, listeners and background tasks wired together.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use textui_config::Config;
use textui_render::{Canvas, PixmapCanvas};

use crate::app::editor::Editor;
use crate::app::marquee::Marquee;
use crate::blink::{BlinkDriver, SharedCursor};
use crate::input::{Key, KeyboardEvent};
use crate::mapper::CellPos;
use crate::task::TaskSet;
use crate::window::{TextUiWindow, WindowSettings};

/// Longest single wait while the session idles; bounds shutdown latency.
const PUMP_SLICE: Duration = Duration::from_millis(50);

/// Options for a headless run.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub exit_after: Duration,
    /// `Some(empty)` picks a timestamped name in the current directory
    pub screenshot: Option<PathBuf>,
    /// Replayed as keyboard input; `\n` moves to the next line
    pub typed_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub repaints: u64,
    pub mutations: usize,
    pub cursor: CellPos,
    pub screenshot: Option<PathBuf>,
}

/// A running editor. Tasks are declared first so they are joined before the
/// window is dropped.
pub struct EditorSession<C: Canvas> {
    tasks: TaskSet,
    window: TextUiWindow<C>,
    editor: Editor,
    mutations: usize,
}

impl<C: Canvas> EditorSession<C> {
    /// Register the editor on `window` and start the blink and marquee tasks.
    pub fn start(mut window: TextUiWindow<C>, config: &Config) -> Result<Self> {
        let cursor = SharedCursor::default();
        let editor = Editor::new(
            cursor.clone(),
            config.editor_first_row,
            window.grid().cols(),
            window.grid().rows(),
        );
        window.add_pointer_listener(Box::new(editor.clone()));
        window.add_keyboard_listener(Box::new(editor.clone()));

        let mut tasks = TaskSet::new();
        tasks.push(
            BlinkDriver::spawn(
                window.handle(),
                cursor,
                Duration::from_millis(config.cursor_blink_interval_ms),
            )
            .context("Failed to start cursor blink")?,
        );
        if !config.marquee_text.is_empty() {
            tasks.push(
                Marquee::spawn(
                    window.handle(),
                    &config.marquee_text,
                    window.grid().cols(),
                    Duration::from_millis(config.marquee_interval_ms),
                )
                .context("Failed to start marquee")?,
            );
        }

        window.repaint();
        log::info!("Editor session started with {} background tasks", tasks.len());
        Ok(Self {
            tasks,
            window,
            editor,
            mutations: 0,
        })
    }

    pub fn window(&self) -> &TextUiWindow<C> {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut TextUiWindow<C> {
        &mut self.window
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Feed `text` through the keyboard path, one character at a time.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            let event = if ch == '\n' {
                KeyboardEvent::KeyDown(Key::Enter)
            } else {
                KeyboardEvent::Typed(ch)
            };
            self.window.handle_keyboard(&event);
            self.pump();
        }
    }

    pub fn pump(&mut self) {
        self.mutations += self.window.pump().mutations;
    }

    /// Service the UI queue until `duration` has elapsed.
    pub fn run_for(&mut self, duration: Duration) {
        let deadline = deadline_after(Instant::now(), duration);
        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            let slice = (deadline - now).min(PUMP_SLICE);
            self.mutations += self.window.pump_timeout(slice).mutations;
        }
    }

    /// Cancel and join every task, apply what they left queued and hand the
    /// window back.
    pub fn shutdown(self) -> Result<(TextUiWindow<C>, SessionReport)> {
        let Self {
            mut tasks,
            mut window,
            editor,
            mut mutations,
        } = self;
        tasks.shutdown().context("Background task failed")?;
        mutations += window.pump().mutations;

        let report = SessionReport {
            repaints: window.repaint_count(),
            mutations,
            cursor: editor.cursor(),
            screenshot: None,
        };
        log::info!(
            "Editor session finished: {} repaints, {} mutations",
            report.repaints,
            report.mutations
        );
        Ok((window, report))
    }
}

/// Run the demo editor without a display and optionally save a screenshot.
pub fn run_headless(config: &Config, options: &SessionOptions) -> Result<SessionReport> {
    config.validate().context("Invalid configuration")?;
    let window = TextUiWindow::<PixmapCanvas>::new(&WindowSettings::from_config(config))?;
    let mut session = EditorSession::start(window, config)?;

    if let Some(text) = &options.typed_text {
        session.type_text(text);
    }
    session.run_for(options.exit_after);

    let (window, mut report) = session.shutdown()?;
    if let Some(path) = &options.screenshot {
        let path = resolve_screenshot_path(path);
        window
            .canvas()
            .save_png(&path)
            .with_context(|| format!("Failed to save screenshot to {}", path.display()))?;
        log::info!("Screenshot saved to {}", path.display());
        report.screenshot = Some(path);
    }
    Ok(report)
}

/// `start + duration`, saturating at roughly a century for durations the
/// platform clock cannot represent.
fn deadline_after(start: Instant, duration: Duration) -> Instant {
    const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);
    start
        .checked_add(duration)
        .or_else(|| start.checked_add(FAR_FUTURE))
        .unwrap_or(start)
}

fn resolve_screenshot_path(path: &Path) -> PathBuf {
    if !path.as_os_str().is_empty() {
        return path.to_path_buf();
    }
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    PathBuf::from(format!("textui_screenshot_{secs}.png"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_saturates_instead_of_overflowing() {
        let start = Instant::now();
        assert_eq!(
            deadline_after(start, Duration::from_millis(5)),
            start + Duration::from_millis(5)
        );
        for duration in [Duration::from_secs(10_000_000_000_000_000_000), Duration::MAX] {
            assert!(deadline_after(start, duration) >= start);
        }
    }

    #[test]
    fn test_explicit_screenshot_path_is_kept() {
        let path = PathBuf::from("/tmp/shot.png");
        assert_eq!(resolve_screenshot_path(&path), path);
    }

    #[test]
    fn test_empty_screenshot_path_gets_timestamped_name() {
        let path = resolve_screenshot_path(Path::new(""));
        let name = path.to_string_lossy();
        assert!(name.starts_with("textui_screenshot_"));
        assert!(name.ends_with(".png"));
    }
}
