//! Tests for the full validation pipeline.

use super::*;
use crate::schema::*;

#[test]
fn default_config_validates() {
    assert!(validate(&HookchatConfig::default()).is_ok());
}

#[test]
fn catches_empty_webhook_url() {
    let mut config = HookchatConfig::default();
    config.chat.webhook_url = String::new();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("chat.webhook_url must not be empty"));
}

#[test]
fn catches_non_http_webhook_url() {
    let mut config = HookchatConfig::default();
    config.chat.webhook_url = "ftp://example.com".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("chat.webhook_url"));
}

#[test]
fn catches_bare_scheme() {
    let options = ChatOptions::new("https://");
    let err = validate_chat_options(&options).unwrap_err().to_string();
    assert!(err.contains("has no host"));
}

#[test]
fn catches_http_live_socket_url() {
    let options = ChatOptions::default().with_live_socket_url("http://example.com/ws");
    let err = validate_chat_options(&options).unwrap_err().to_string();
    assert!(err.contains("chat.live_socket_url"));
}

#[test]
fn accepts_wss_live_socket_url() {
    let options = ChatOptions::default().with_live_socket_url("wss://example.com/ws");
    assert!(validate_chat_options(&options).is_ok());
}

#[test]
fn catches_timeout_out_of_range() {
    let mut config = HookchatConfig::default();
    config.chat.request_timeout_secs = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("chat.request_timeout_secs"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = HookchatConfig::default();
    config.chat.chat_input_key = " ".into();
    config.chat.session_storage_key = String::new();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("chat.chat_input_key"));
    assert!(err.contains("chat.session_storage_key"));
    assert!(err.contains("; "));
}
