//! Configuration system for the textui character-grid display.
//!
//! This crate provides:
//!
//! - The [`Config`] struct with YAML loading, saving and validation
//! - Default values for every setting ([`defaults`])
//! - The shared [`Color`] and [`Cell`] types used by the grid and renderer
//! - Typed configuration errors ([`ConfigError`])

pub mod cell;
pub mod color;
pub mod config;
pub mod defaults;
pub mod error;
mod types;

// Re-export main types for convenience
pub use cell::Cell;
pub use color::Color;
pub use config::Config;
pub use error::ConfigError;
pub use types::LogLevel;
