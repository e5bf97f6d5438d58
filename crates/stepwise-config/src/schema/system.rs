//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// The `tracing` filter directive for this level, scoped to our crates.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "stepwise=debug",
            LogLevel::Info => "stepwise=info",
            LogLevel::Warning => "stepwise=warn",
            LogLevel::Error => "stepwise=error",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
