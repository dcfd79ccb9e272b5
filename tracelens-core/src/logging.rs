//! Diagnostic output for the normalization pipeline
//!
//! The library never prints; everything it has to say about malformed
//! records goes through `tracing` (most prominently the registry's
//! parse-failure warnings). This module routes those diagnostics to a
//! daily-rotated file under `$XDG_STATE_HOME/tracelens/`.

use crate::config::{Config, LoggingConfig};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Guard that keeps the logging system alive
///
/// When dropped, flushes any pending log writes.
pub struct LoggingGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Route diagnostics to the default XDG state directory.
///
/// The level comes from `RUST_LOG` when set, else from the config. The
/// returned guard must outlive all logging callers.
pub fn init(config: &LoggingConfig) -> crate::error::Result<LoggingGuard> {
    init_at(config, &Config::state_dir())
}

/// Route diagnostics to a daily-rotated `tracelens.log` under `log_dir`.
///
/// The directory is created if missing. Split out from [`init`] so tests
/// and embedding applications can pick the destination.
pub fn init_at(config: &LoggingConfig, log_dir: &Path) -> crate::error::Result<LoggingGuard> {
    std::fs::create_dir_all(log_dir)?;

    let appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "tracelens.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!(
        log_dir = %log_dir.display(),
        level = %config.level,
        "logging initialized"
    );

    Ok(LoggingGuard { _guard: guard })
}

/// Initialize logging for tests (logs to the test writer)
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .with_span_events(FmtSpan::CLOSE)
        .try_init();
}

/// Returns the log file path
pub fn log_file_path() -> PathBuf {
    Config::log_path()
}
