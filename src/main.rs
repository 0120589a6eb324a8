
use anyhow::{Context, Result};
use textui::app::{SessionOptions, run_headless};
use textui::cli;

fn main() -> Result<()> {
    // Process CLI arguments first (before logging init for cleaner output)
    let runtime_options = match cli::process_cli() {
        cli::CliResult::Exit(code) => {
            if code == 0 {
                return Ok(());
            }
            std::process::exit(code);
        }
        cli::CliResult::Continue(options) => options,
    };
    textui::debug::init_log_bridge(runtime_options.log_level);

    log::info!("Starting textui-editor {}", textui::VERSION);

    let config = runtime_options
        .load_config()
        .context("Failed to load configuration")?;
    textui::debug::apply_config_log_level(config.log_level.to_level_filter());

    let options = SessionOptions {
        exit_after: runtime_options.exit_after(),
        screenshot: runtime_options.screenshot.clone(),
        typed_text: runtime_options.type_text.clone(),
    };

    match run_headless(&config, &options) {
        Ok(report) => {
            log::info!(
                "Session ended with cursor at ({}, {})",
                report.cursor.col,
                report.cursor.row
            );
            if let Some(path) = report.screenshot {
                println!("{}", path.display());
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("textui-editor: error: {e:#}");
            Err(e)
        }
    }
}
