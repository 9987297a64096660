//! Chat widget options: webhook target, session behaviour, request shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Storage key under which the last session id is persisted.
pub const DEFAULT_SESSION_STORAGE_KEY: &str = "hookchat-session-id";

/// HTTP method used to call the webhook.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    #[default]
    Post,
}

/// How requests are issued against the webhook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    pub method: HttpMethod,
    /// Extra headers added to every request.
    pub headers: BTreeMap<String, String>,
}

/// Options accepted by a chat session at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatOptions {
    pub webhook_url: String,
    pub webhook_config: WebhookConfig,
    /// Bot messages shown before any session activity.
    pub initial_messages: Vec<String>,
    /// Resume the last persisted session on load.
    pub load_previous_session: bool,
    pub enable_streaming: bool,
    /// Request field carrying the user's text.
    pub chat_input_key: String,
    /// Request field carrying the session id.
    pub chat_session_key: String,
    pub session_storage_key: String,
    /// Sent verbatim with every request.
    pub metadata: serde_json::Map<String, serde_json::Value>,
    /// WebSocket endpoint for replies to executions that finish out of band.
    pub live_socket_url: Option<String>,
    /// Whole-request timeout (valid range: 1-600).
    pub request_timeout_secs: u32,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            webhook_url: "http://localhost:5678/webhook/chat".into(),
            webhook_config: WebhookConfig::default(),
            initial_messages: Vec::new(),
            load_previous_session: false,
            enable_streaming: false,
            chat_input_key: "chatInput".into(),
            chat_session_key: "sessionId".into(),
            session_storage_key: DEFAULT_SESSION_STORAGE_KEY.into(),
            metadata: serde_json::Map::new(),
            live_socket_url: None,
            request_timeout_secs: 60,
        }
    }
}

impl ChatOptions {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            ..Self::default()
        }
    }

    pub fn with_initial_messages<I, S>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.initial_messages = messages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_load_previous_session(mut self, enabled: bool) -> Self {
        self.load_previous_session = enabled;
        self
    }

    pub fn with_streaming(mut self, enabled: bool) -> Self {
        self.enable_streaming = enabled;
        self
    }

    pub fn with_session_storage_key(mut self, key: impl Into<String>) -> Self {
        self.session_storage_key = key.into();
        self
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.webhook_config.method = method;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.webhook_config.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn with_live_socket_url(mut self, url: impl Into<String>) -> Self {
        self.live_socket_url = Some(url.into());
        self
    }
}
