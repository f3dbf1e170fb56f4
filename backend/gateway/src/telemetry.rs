//! Structured logging setup.
//!
//! Console output for interactive runs plus a daily-rolling NDJSON file for
//! ingestion, with `RUST_LOG` taking precedence over the configured level.

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global logger. Later calls are no-ops, so library tests
/// and embedding binaries can both call this freely.
pub fn init_logger(log_dir: impl AsRef<Path>, default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // `<log_dir>/voxhook.log.YYYY-MM-DD`, one JSON object per line
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "voxhook.log");
    let file_layer = fmt::layer()
        .json()
        .with_writer(file_appender)
        .with_ansi(false);

    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_ansi(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
}
