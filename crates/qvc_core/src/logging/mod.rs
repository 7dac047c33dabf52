//! Logging infrastructure.
//!
//! Everything logs through `tracing`. The front end calls one of the
//! initializers once at startup:
//! - [`init_tracing_with_file`] for stderr plus a daily log file
//! - [`init_file_tracing`] for the log file only

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod types;

pub use types::LogLevel;

/// Prefix used for daily log files.
const LOG_FILE_PREFIX: &str = "quantum-vs-classical.log";

/// Initialize tracing with stderr output plus a daily rolling log file.
///
/// This sets up a subscriber that:
/// - Respects RUST_LOG environment variable
/// - Falls back to the provided default level
/// - Outputs to stderr, with or without timestamps
/// - Mirrors everything into `logs_dir` without ANSI codes
///
/// Should be called once at application startup. The returned guard flushes
/// the file writer when dropped; keep it alive for the lifetime of the
/// program.
pub fn init_tracing_with_file(
    default_level: LogLevel,
    show_timestamps: bool,
    logs_dir: &Path,
) -> WorkerGuard {
    let filter = build_filter(default_level);

    let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false);
    let stderr_layer = if show_timestamps {
        stderr_layer.boxed()
    } else {
        stderr_layer.without_time().boxed()
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter)
        .init();

    guard
}

/// Initialize tracing that writes only to the daily rolling log file.
///
/// For front ends that own the terminal, where stderr output would tear the
/// display.
pub fn init_file_tracing(default_level: LogLevel, logs_dir: &Path) -> WorkerGuard {
    let filter = build_filter(default_level);

    let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter)
        .init();

    guard
}

fn build_filter(default_level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)))
}

/// Convert LogLevel to filter string.
fn level_to_filter_str(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}
