//! Command-line interface for textui-editor.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use textui_config::{Color, Config};

/// How long the headless editor runs when `--exit-after` is not given.
pub const DEFAULT_EXIT_AFTER: Duration = Duration::from_secs(2);

/// Upper bound for `--exit-after`; larger values are clamped.
pub const MAX_EXIT_AFTER: Duration = Duration::from_secs(24 * 60 * 60);

/// textui-editor - A character-grid demo text editor
#[derive(Parser)]
#[command(name = "textui-editor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file to use instead of ~/.config/textui/config.yaml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long, value_name = "COLS")]
    pub cols: Option<u32>,

    /// Grid height in cells
    #[arg(long, value_name = "ROWS")]
    pub rows: Option<u32>,

    /// Font size in points
    #[arg(long, value_name = "POINTS")]
    pub font_size: Option<u32>,

    /// Monospace font family
    #[arg(long, value_name = "FAMILY")]
    pub font_family: Option<String>,

    /// Horizontal gap between cells in pixels
    #[arg(long, value_name = "PIXELS", allow_negative_numbers = true)]
    pub gap: Option<i32>,

    /// Text foreground color (#RRGGBB or #RRGGBBAA)
    #[arg(long, value_name = "HEX", value_parser = parse_color)]
    pub text_fg: Option<Color>,

    /// Text background color (#RRGGBB or #RRGGBBAA)
    #[arg(long, value_name = "HEX", value_parser = parse_color)]
    pub text_bg: Option<Color>,

    /// Blinking cursor foreground color (#RRGGBB or #RRGGBBAA)
    #[arg(long, value_name = "HEX", value_parser = parse_color)]
    pub blink_fg: Option<Color>,

    /// Blinking cursor background color (#RRGGBB or #RRGGBBAA)
    #[arg(long, value_name = "HEX", value_parser = parse_color)]
    pub blink_bg: Option<Color>,

    /// Exit after the specified number of seconds
    #[arg(long, value_name = "SECONDS")]
    pub exit_after: Option<f64>,

    /// Take a screenshot and save to the specified path (default: timestamped PNG in current dir)
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = "")]
    pub screenshot: Option<PathBuf>,

    /// Text to type into the editor after startup ("\n" starts a new line)
    #[arg(long = "type", value_name = "TEXT")]
    pub type_text: Option<String>,

    /// Set debug log level (overrides config and RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the effective configuration as YAML and exit
    PrintConfig,
}

/// Runtime options passed from CLI to the application
#[derive(Clone, Debug, Default)]
pub struct RuntimeOptions {
    pub config_path: Option<PathBuf>,
    pub cols: Option<u32>,
    pub rows: Option<u32>,
    pub font_size: Option<u32>,
    pub font_family: Option<String>,
    pub gap: Option<i32>,
    pub text_fg: Option<Color>,
    pub text_bg: Option<Color>,
    pub blink_fg: Option<Color>,
    pub blink_bg: Option<Color>,
    /// Exit after this many seconds
    pub exit_after: Option<f64>,
    /// Take a screenshot: `Some("")` auto-names the file, `Some(path)` uses
    /// that path, `None` takes no screenshot
    pub screenshot: Option<PathBuf>,
    /// Text replayed through the keyboard path
    pub type_text: Option<String>,
    /// Log level override from CLI
    pub log_level: Option<log::LevelFilter>,
}

impl RuntimeOptions {
    /// Overlay the grid and font flags onto `config`.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(font_size) = self.font_size {
            config.font_size = font_size;
        }
        if let Some(family) = &self.font_family {
            config.font_family = family.clone();
        }
        if let Some(gap) = self.gap {
            config.char_gap = gap;
        }
        if let Some(color) = self.text_fg {
            config.text_foreground = color;
        }
        if let Some(color) = self.text_bg {
            config.text_background = color;
        }
        if let Some(color) = self.blink_fg {
            config.blink_foreground = color;
        }
        if let Some(color) = self.blink_bg {
            config.blink_background = color;
        }
    }

    /// Load the configuration named by `--config`, or the default one, apply
    /// command-line overrides and validate the result.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config_path {
            Some(path) => Config::read_from(path)?,
            None => Config::read()?,
        };
        self.apply_to(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Run time of the headless session.
    ///
    /// Negative or NaN values fall back to [`DEFAULT_EXIT_AFTER`]; anything
    /// longer than [`MAX_EXIT_AFTER`], infinity included, is clamped.
    pub fn exit_after(&self) -> Duration {
        match self.exit_after {
            Some(secs) if secs >= 0.0 => Duration::try_from_secs_f64(secs)
                .map_or(MAX_EXIT_AFTER, |duration| duration.min(MAX_EXIT_AFTER)),
            _ => DEFAULT_EXIT_AFTER,
        }
    }
}

fn parse_color(value: &str) -> Result<Color, String> {
    Color::from_hex(value)
        .ok_or_else(|| format!("invalid color '{value}', expected #RRGGBB or #RRGGBBAA"))
}

/// Result of CLI processing
pub enum CliResult {
    /// Continue with normal application startup, with optional runtime options
    Continue(RuntimeOptions),
    /// Exit with the given code (subcommand completed)
    Exit(i32),
}

fn runtime_options(cli: Cli) -> RuntimeOptions {
    RuntimeOptions {
        config_path: cli.config,
        cols: cli.cols,
        rows: cli.rows,
        font_size: cli.font_size,
        font_family: cli.font_family,
        gap: cli.gap,
        text_fg: cli.text_fg,
        text_bg: cli.text_bg,
        blink_fg: cli.blink_fg,
        blink_bg: cli.blink_bg,
        exit_after: cli.exit_after,
        screenshot: cli.screenshot,
        type_text: cli.type_text.map(|t| t.replace("\\n", "\n")),
        log_level: cli.log_level.map(|l| l.to_level_filter()),
    }
}

/// Process CLI arguments and handle subcommands
pub fn process_cli() -> CliResult {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::PrintConfig) => {
            let options = runtime_options(cli);
            let result = print_config(&options);
            if let Err(e) = &result {
                eprintln!("textui-editor: error: {e:#}");
            }
            CliResult::Exit(if result.is_ok() { 0 } else { 1 })
        }
        None => CliResult::Continue(runtime_options(cli)),
    }
}

fn print_config(options: &RuntimeOptions) -> anyhow::Result<()> {
    let config = options.load_config()?;
    print!("{}", serde_yaml_ng::to_string(&config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> RuntimeOptions {
        let mut argv = vec!["textui-editor"];
        argv.extend_from_slice(args);
        runtime_options(Cli::parse_from(argv))
    }

    #[test]
    fn test_grid_overrides_apply_to_config() {
        let options = parse(&["--cols", "10", "--rows", "5", "--gap", "0", "--font-size", "12"]);
        let mut config = Config::default();
        options.apply_to(&mut config);
        assert_eq!((config.cols, config.rows), (10, 5));
        assert_eq!(config.char_gap, 0);
        assert_eq!(config.font_size, 12);
        assert_eq!(config.font_family, Config::default().font_family);
    }

    #[test]
    fn test_negative_gap_is_parsed_then_rejected_by_validation() {
        let options = parse(&["--gap", "-2"]);
        let mut config = Config::default();
        options.apply_to(&mut config);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_typed_text_escape_becomes_newline() {
        let options = parse(&["--type", "ab\\ncd"]);
        assert_eq!(options.type_text.as_deref(), Some("ab\ncd"));
    }

    #[test]
    fn test_screenshot_without_value_is_empty_path() {
        let options = parse(&["--screenshot"]);
        assert_eq!(options.screenshot, Some(PathBuf::new()));
    }

    fn with_exit_after(secs: f64) -> RuntimeOptions {
        RuntimeOptions {
            exit_after: Some(secs),
            ..RuntimeOptions::default()
        }
    }

    #[test]
    fn test_exit_after_defaults_and_rejects_negative() {
        assert_eq!(parse(&[]).exit_after(), DEFAULT_EXIT_AFTER);
        assert_eq!(
            parse(&["--exit-after", "0.5"]).exit_after(),
            Duration::from_millis(500)
        );
        assert_eq!(with_exit_after(-1.0).exit_after(), DEFAULT_EXIT_AFTER);
        assert_eq!(with_exit_after(f64::NAN).exit_after(), DEFAULT_EXIT_AFTER);
    }

    #[test]
    fn test_huge_exit_after_is_clamped() {
        for secs in [1e19, 1e20, f64::MAX, f64::INFINITY] {
            assert_eq!(
                with_exit_after(secs).exit_after(),
                MAX_EXIT_AFTER,
                "secs = {secs}"
            );
        }
        assert_eq!(parse(&["--exit-after", "1e20"]).exit_after(), MAX_EXIT_AFTER);
    }

    #[test]
    fn test_color_flags_parse_hex() {
        let options = parse(&["--text-fg", "#ff8000", "--blink-bg", "10203040"]);
        let mut config = Config::default();
        options.apply_to(&mut config);
        assert_eq!(config.text_foreground, Color::rgb(255, 128, 0));
        assert_eq!(config.blink_background, Color::new(0x10, 0x20, 0x30, 0x40));
        assert_eq!(config.text_background, Config::default().text_background);
    }

    #[test]
    fn test_bad_color_flag_is_rejected() {
        let result = Cli::try_parse_from(["textui-editor", "--text-bg", "#fff"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_overrides_are_validated_after_file_values() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "rows: 0\n").unwrap();
        let path_arg = path.to_string_lossy().to_string();

        let rescued = parse(&["--config", &path_arg, "--rows", "1"]);
        let config = rescued.load_config().unwrap();
        assert_eq!(config.rows, 1);

        let invalid = parse(&["--config", &path_arg]);
        assert!(invalid.load_config().is_err());
    }

    #[test]
    fn test_log_level_flag() {
        let options = parse(&["--log-level", "debug"]);
        assert_eq!(options.log_level, Some(log::LevelFilter::Debug));
    }
}
