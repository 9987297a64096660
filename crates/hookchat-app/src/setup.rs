//! Resolves the effective config from the loaded file and CLI flags.

use hookchat_common::ConfigError;
use hookchat_config::{validation, HookchatConfig};
use tracing::warn;

use crate::cli::Args;

/// Merge CLI overrides into the loaded config and validate the result once.
///
/// Defaults are used only when the default config file is missing or
/// unreadable. A config that parsed but fails validation is an error, so a
/// bad field never silently redirects messages to the default webhook.
pub fn resolve_config(
    loaded: Result<HookchatConfig, ConfigError>,
    args: &Args,
) -> Result<HookchatConfig, ConfigError> {
    let mut config = match loaded {
        Ok(config) => config,
        Err(e) if args.config.is_some() => return Err(e),
        Err(e @ (ConfigError::FileNotFound(_) | ConfigError::ParseError(_))) => {
            warn!("Config load failed, using defaults: {e}");
            HookchatConfig::default()
        }
        Err(e) => return Err(e),
    };

    if let Some(url) = &args.webhook_url {
        config.chat.webhook_url = url.clone();
    }
    if args.stream {
        config.chat.enable_streaming = true;
    }
    if args.resume {
        config.chat.load_previous_session = true;
    }

    validation::validate_chat_options(&config.chat)?;
    Ok(config)
}
