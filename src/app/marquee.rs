//! Rotating banner on the top row.

use std::collections::VecDeque;
use std::time::Duration;

use anyhow::Result;

use crate::task::ScopedTask;
use crate::ui_queue::UiHandle;

/// Text that rotates left by one character per step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarqueeText {
    chars: VecDeque<char>,
}

impl MarqueeText {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn current(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn rotate(&mut self) {
        if !self.chars.is_empty() {
            self.chars.rotate_left(1);
        }
    }

    /// Column at which the text is centered on a `cols`-wide row.
    pub fn centered_column(&self, cols: u32) -> i32 {
        (cols as i32 - self.chars.len() as i32) / 2
    }
}

pub struct Marquee;

impl Marquee {
    /// Print `text` centered on row 0 every `interval`, rotating it each time.
    pub fn spawn(
        handle: UiHandle,
        text: &str,
        cols: u32,
        interval: Duration,
    ) -> Result<ScopedTask> {
        let mut text = MarqueeText::new(text);
        let column = text.centered_column(cols);
        ScopedTask::spawn("marquee", move |token| {
            while !token.wait_timeout(interval) {
                let frame = text.current();
                let posted = handle.mutate_and_repaint(move |grid| {
                    grid.print_text(column, 0, &frame);
                });
                if posted.is_err() {
                    log::debug!("Marquee stopping: UI queue closed");
                    return;
                }
                text.rotate();
            }
            log::debug!("Marquee cancelled");
        })
    }
}
