//! Process-wide logging: console plus an append-mode log file
//!
//! Only the binary installs this. The library reports through
//! `SyncEvent`s and never writes to a log stream itself.

use crate::types::SyncError;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Local timestamps shaped like `2024-05-01 13:37:00,123`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTimestamp;

impl FormatTime for LogTimestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{} -", chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"))
    }
}

/// Default filter directive for a verbosity level
///
/// `RUST_LOG` takes precedence when set.
pub fn default_directive(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "replika=warn";
    }
    match verbosity {
        0 => "replika=info",
        1 => "replika=debug",
        _ => "replika=trace",
    }
}

/// Install the global subscriber
///
/// Console lines go to stderr without timestamps; the log file gets every
/// line prefixed with a local timestamp, no colors, appended across runs.
pub fn init_logging(log_file: &Path, verbosity: u8, quiet: bool) -> Result<(), SyncError> {
    if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SyncError::from_io(parent, e))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| {
            SyncError::Config(format!(
                "Cannot open log file {}: {}",
                log_file.display(),
                e
            ))
        })?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity, quiet)));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_timer(LogTimestamp);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| SyncError::Config(format!("Logging already initialized: {e}")))
}
