//! Rendering engine for the textui character grid.
//!
//! The renderer paints cells through the [`Canvas`] trait so the same repaint
//! logic drives any surface. [`PixmapCanvas`] is the bundled CPU surface: an
//! RGBA framebuffer that rasterizes glyphs with `textui-fonts` and can be
//! saved as a PNG screenshot.

pub mod canvas;
pub mod error;
pub mod pixmap;
pub mod renderer;

pub use canvas::{Canvas, PixelRect};
pub use error::RenderError;
pub use pixmap::PixmapCanvas;
pub use renderer::{GridFrame, Renderer};
