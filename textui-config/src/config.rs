//! Core `Config` struct with persistence, path resolution and validation.

use crate::color::Color;
use crate::defaults;
use crate::error::ConfigError;
use crate::types::LogLevel;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for the text UI window and the demo editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // ========================================================================
    // Grid
    // ========================================================================
    /// Number of columns in the grid
    #[serde(default = "crate::defaults::cols")]
    pub cols: u32,

    /// Number of rows in the grid
    #[serde(default = "crate::defaults::rows")]
    pub rows: u32,

    // ========================================================================
    // Font
    // ========================================================================
    /// Monospace font family name
    #[serde(default = "crate::defaults::font_family")]
    pub font_family: String,

    /// Font size in points
    #[serde(default = "crate::defaults::font_size")]
    pub font_size: u32,

    /// Use the bold face of the font family
    #[serde(default = "crate::defaults::font_bold")]
    pub font_bold: bool,

    /// Horizontal gap between adjacent cells in pixels
    #[serde(default = "crate::defaults::char_gap")]
    pub char_gap: i32,

    // ========================================================================
    // Colors
    // ========================================================================
    /// Foreground applied to every character written
    #[serde(default = "crate::defaults::text_foreground")]
    pub text_foreground: Color,

    /// Background applied to every character written
    #[serde(default = "crate::defaults::text_background")]
    pub text_background: Color,

    /// Glyph color of a cell whose blink flag is on
    #[serde(default = "crate::defaults::blink_foreground")]
    pub blink_foreground: Color,

    /// Fill color of a cell whose blink flag is on
    #[serde(default = "crate::defaults::blink_background")]
    pub blink_background: Color,

    // ========================================================================
    // Timers
    // ========================================================================
    /// Interval between cursor blink toggles
    #[serde(default = "crate::defaults::cursor_blink_interval_ms")]
    pub cursor_blink_interval_ms: u64,

    /// Interval between marquee rotations
    #[serde(default = "crate::defaults::marquee_interval_ms")]
    pub marquee_interval_ms: u64,

    // ========================================================================
    // Demo editor
    // ========================================================================
    /// Text scrolled across the top row; empty disables the marquee
    #[serde(default = "crate::defaults::marquee_text")]
    pub marquee_text: String,

    /// First row the editor cursor may occupy
    #[serde(default = "crate::defaults::editor_first_row")]
    pub editor_first_row: u32,

    /// Height of window chrome above the grid, subtracted from pointer y
    #[serde(default)]
    pub title_border_thickness: i32,

    // ========================================================================
    // Debug Logging
    // ========================================================================
    /// Log level for the debug log file
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cols: defaults::cols(),
            rows: defaults::rows(),
            font_family: defaults::font_family(),
            font_size: defaults::font_size(),
            font_bold: defaults::font_bold(),
            char_gap: defaults::char_gap(),
            text_foreground: defaults::text_foreground(),
            text_background: defaults::text_background(),
            blink_foreground: defaults::blink_foreground(),
            blink_background: defaults::blink_background(),
            cursor_blink_interval_ms: defaults::cursor_blink_interval_ms(),
            marquee_interval_ms: defaults::marquee_interval_ms(),
            marquee_text: defaults::marquee_text(),
            editor_first_row: defaults::editor_first_row(),
            title_border_thickness: 0,
            log_level: LogLevel::default(),
        }
    }
}

/// Validate the construction parameters of a grid.
///
/// Width and height must be at least one cell, the font size at least one
/// point and the inter-cell gap non-negative.
pub fn validate_grid_params(
    cols: u32,
    rows: u32,
    font_size: u32,
    char_gap: i32,
) -> Result<(), ConfigError> {
    if cols < defaults::MINIMUM_GRID_DIMENSION {
        return Err(ConfigError::Validation(format!(
            "grid width is invalid ({cols}). Must be at least {}",
            defaults::MINIMUM_GRID_DIMENSION
        )));
    }
    if rows < defaults::MINIMUM_GRID_DIMENSION {
        return Err(ConfigError::Validation(format!(
            "grid height is invalid ({rows}). Must be at least {}",
            defaults::MINIMUM_GRID_DIMENSION
        )));
    }
    if font_size < defaults::MINIMUM_FONT_SIZE {
        return Err(ConfigError::Validation(format!(
            "font size is invalid ({font_size}). Must be at least {}",
            defaults::MINIMUM_FONT_SIZE
        )));
    }
    if char_gap < 0 {
        return Err(ConfigError::Validation(format!(
            "char gap is negative ({char_gap}). Must be at least 0"
        )));
    }
    Ok(())
}

impl Config {
    /// Check every field with a constrained range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_grid_params(self.cols, self.rows, self.font_size, self.char_gap)?;
        if self.cursor_blink_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "cursor_blink_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.marquee_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "marquee_interval_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load and validate configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = Self::read_from(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Read the default config file without validating it, creating it with
    /// defaults if absent. Callers that layer overrides on top validate once
    /// afterwards.
    pub fn read() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            Self::read_from(&config_path)
        } else {
            log::info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            if let Err(e) = config.save() {
                log::error!("Failed to save default config: {}", e);
                return Err(e);
            }
            log::info!("Default config created successfully");
            Ok(config)
        }
    }

    /// Parse `path` without validating it
    pub fn read_from(path: &Path) -> Result<Self> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path)
            .map_err(ConfigError::from)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = serde_yaml_ng::from_str(&contents)
            .map_err(ConfigError::from)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::from)?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::from)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(ConfigError::from)?;
        fs::rename(&temp_path, path).map_err(ConfigError::from)?;

        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("textui")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            // Use XDG convention on all platforms: ~/.config/textui
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("textui")
            } else {
                PathBuf::from(".")
            }
        }
    }
}
