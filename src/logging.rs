//! Tracing subscriber setup
//!
//! One stdout layer, human-readable or JSON, plus an optional non-blocking
//! file layer without ANSI colours. `RUST_LOG` overrides the configured level.

use crate::config::LogConfig;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber
///
/// Logs always go to stdout; with `config.file` set they are also appended
/// to that file through a non-blocking writer. Keep the returned guard alive
/// for as long as file logging should be flushed.
pub fn init_logging(config: &LogConfig) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let (file_layer, guard) = match &config.file {
        Some(path) => {
            let (dir, file_name) = split_log_path(path);
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_target(false)
                .with_writer(non_blocking)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if config.json {
        let stdout_layer = fmt::layer().json().with_target(true);
        registry.with(stdout_layer).init();
    } else {
        let stdout_layer = fmt::layer().with_target(false).with_ansi(true);
        registry.with(stdout_layer).init();
    }

    guard
}

fn split_log_path(path: &Path) -> (&Path, &Path) {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().map(Path::new).unwrap_or(Path::new("card_bank.log"));
    (dir, file_name)
}
