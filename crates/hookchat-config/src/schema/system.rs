//! Storage and logging configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the session id is persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file holding persisted keys. `None` uses the platform data dir.
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the store file, falling back to `<data_dir>/hookchat/store.json`.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("hookchat").join("store.json")))
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `tracing` filter directive for the workspace crates.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "hookchat=trace",
            LogLevel::Debug => "hookchat=debug",
            LogLevel::Info => "hookchat=info",
            LogLevel::Warn => "hookchat=warn",
            LogLevel::Error => "hookchat=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
