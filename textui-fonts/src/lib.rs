//! Font handling for the textui character grid.
//!
//! This crate provides:
//! - Monospace font discovery through the system font database
//! - Cell metrics (cell width/height, baseline, inter-cell gap) derived once per font
//! - Alpha-mask glyph rasterization with an LRU glyph cache
//!
//! Nothing here depends on a window or GPU, so metrics can be computed before
//! any surface exists.

pub mod error;
pub mod font_data;
pub mod loader;
pub mod metrics;
pub mod rasterizer;

// Re-export main types for convenience
pub use error::FontError;
pub use font_data::FontData;
pub use loader::load_monospace_font;
pub use metrics::{CellMetrics, calculate_cell_metrics, font_size_to_pixels};
pub use rasterizer::{GlyphMask, GlyphRasterizer};
