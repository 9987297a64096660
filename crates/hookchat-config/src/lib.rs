//! hookchat configuration.
//!
//! TOML-based configuration for the chat widget client. Every section uses
//! serde defaults so a file that only sets `chat.webhook_url` is complete.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hookchat_config::{config_to_json, load_config};
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    ChatOptions, HookchatConfig, HttpMethod, LogLevel, LoggingConfig, StorageConfig,
    WebhookConfig, CONFIG_SCHEMA_VERSION, DEFAULT_SESSION_STORAGE_KEY,
};
pub use toml_loader::{default_config_path, load_default, load_from_path};

use hookchat_common::ConfigError;

/// Load config from the platform default path and validate it.
///
/// Creates a commented default file on first run.
pub fn load_config() -> Result<HookchatConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &HookchatConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
