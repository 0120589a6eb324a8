use parking_lot::Mutex;
/// Logging bridge for textui
///
/// Routes every `log::info!()`, `log::debug!()` etc. to a debug log file:
/// /tmp/textui_debug.log on Unix/macOS, %TEMP%\textui_debug.log on Windows.
/// Keeping log output off stdout/stderr leaves the terminal to the program.
///
/// Level precedence: `--log-level` flag, then `RUST_LOG`, then the config
/// file's `log_level`. When `RUST_LOG` is set, records are mirrored to stderr.
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

struct LogBridge {
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Set when the level came from the CLI or `RUST_LOG`; the config level is
/// then ignored.
static LEVEL_PINNED: AtomicBool = AtomicBool::new(false);

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    let path = PathBuf::from("/tmp/textui_debug.log");
    #[cfg(not(unix))]
    let path = std::env::temp_dir().join("textui_debug.log");
    path
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

fn format_record(record: &log::Record<'_>) -> String {
    format!(
        "[{}] [{:<5}] [{}] {}\n",
        get_timestamp(),
        record.level(),
        record.target(),
        record.args()
    )
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record);
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.write_all(line.as_bytes());
            let _ = file.flush();
        }
        if self.mirror_stderr {
            eprint!("{line}");
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

/// Install the bridge as the global logger. Safe to call more than once;
/// later calls only adjust the level.
pub fn init_log_bridge(level_override: Option<log::LevelFilter>) {
    let rust_log = std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| log::LevelFilter::from_str(v.trim()).ok());
    let level = level_override.or(rust_log);
    LEVEL_PINNED.store(level.is_some(), Ordering::SeqCst);

    let mut installed = false;
    let bridge = BRIDGE.get_or_init(|| {
        installed = true;
        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
            .ok();
        LogBridge {
            file: Mutex::new(file),
            mirror_stderr: rust_log.is_some(),
        }
    });
    if installed {
        // Another logger may already be set (e.g. by a test harness)
        let _ = log::set_logger(bridge);
    }
    log::set_max_level(level.unwrap_or(log::LevelFilter::Off));
}

/// Apply the config file's level unless the CLI or `RUST_LOG` chose one.
pub fn apply_config_log_level(level: log::LevelFilter) {
    if !LEVEL_PINNED.load(Ordering::SeqCst) {
        log::set_max_level(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_format() {
        let line = format_record(
            &log::Record::builder()
                .args(format_args!("hello {}", 42))
                .level(log::Level::Warn)
                .target("textui::grid")
                .build(),
        );
        assert!(line.ends_with("[WARN ] [textui::grid] hello 42\n"), "{line}");
    }

    #[test]
    fn test_log_path_name() {
        assert!(log_path().ends_with("textui_debug.log"));
    }
}
