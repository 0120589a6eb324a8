//! Typed error types for textui-render.

use thiserror::Error;

/// Errors raised by canvas export.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The framebuffer length does not match `width * height * 4`.
    #[error("Invalid RGBA data size: expected {expected} bytes, got {actual} bytes")]
    InvalidFramebuffer {
        /// Expected byte count (`width * height * 4`).
        expected: usize,
        /// Actual byte count held.
        actual: usize,
    },

    /// The screenshot could not be encoded or written.
    #[error("Screenshot save failed for '{path}': {source}")]
    ScreenshotSave {
        /// Destination path.
        path: String,
        /// Underlying image error.
        #[source]
        source: image::ImageError,
    },
}
