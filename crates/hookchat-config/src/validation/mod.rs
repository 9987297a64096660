//! Full configuration validation.
//!
//! Collects every problem into a single `ConfigError::ValidationError`.

mod helpers;

#[cfg(test)]
mod tests;

use crate::schema::{ChatOptions, HookchatConfig};
use hookchat_common::ConfigError;

use helpers::{validate_not_empty, validate_range, validate_url_scheme};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &HookchatConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();
    validate_chat(&mut errors, &config.chat);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

/// Validate chat options on their own, for callers that build them in code.
pub fn validate_chat_options(options: &ChatOptions) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();
    validate_chat(&mut errors, options);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_chat(errors: &mut Vec<String>, chat: &ChatOptions) {
    validate_url_scheme(
        errors,
        "chat.webhook_url",
        &chat.webhook_url,
        &["http://", "https://"],
    );
    if let Some(ref url) = chat.live_socket_url {
        validate_url_scheme(errors, "chat.live_socket_url", url, &["ws://", "wss://"]);
    }
    validate_not_empty(errors, "chat.chat_input_key", &chat.chat_input_key);
    validate_not_empty(errors, "chat.chat_session_key", &chat.chat_session_key);
    validate_not_empty(errors, "chat.session_storage_key", &chat.session_storage_key);
    validate_range(
        errors,
        "chat.request_timeout_secs",
        chat.request_timeout_secs,
        1,
        600,
    );
    for name in chat.webhook_config.headers.keys() {
        if name.trim().is_empty() {
            errors.push("chat.webhook_config.headers contains an empty header name".into());
        }
    }
}
