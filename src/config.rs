//! Runtime configuration
//!
//! `BankConfig` controls the core (simulated processing delay); `LogConfig`
//! controls the tracing subscriber. Both have defaults matching the demo's
//! expected behaviour and are usually built from CLI arguments.

use std::path::PathBuf;
use std::time::Duration;

/// Default simulated processing time of a guarded operation
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_secs(2);

/// Configuration for the bank core
#[derive(Clone, Debug, PartialEq)]
pub struct BankConfig {
    /// How long an admitted operation waits before applying its effect
    pub processing_delay: Duration,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            processing_delay: DEFAULT_PROCESSING_DELAY,
        }
    }
}

impl BankConfig {
    pub fn new(processing_delay: Duration) -> Self {
        Self { processing_delay }
    }

    /// Build from a delay in milliseconds
    pub fn from_millis(delay_ms: u64) -> Self {
        Self::new(Duration::from_millis(delay_ms))
    }
}

/// Configuration for log output
#[derive(Clone, Debug, PartialEq)]
pub struct LogConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
    /// Also append logs to this file
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}
