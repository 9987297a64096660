//! Webhook response shapes and reply-text normalization.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::message::{ChatMessage, Sender};

/// Response fields probed for the reply text, highest precedence first.
pub const REPLY_FIELDS: [&str; 3] = ["output", "text", "message"];

/// Tag in a stored message's origin marker that identifies user input.
const HUMAN_TAG: &str = "HumanMessage";

/// Body returned by a non-streaming send. The webhook may return any JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SendMessageResponse(Value);

/// How a response should be read.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyShape<'a> {
    /// The workflow runs asynchronously; no reply is contained.
    ExecutionStarted,
    /// The first present reply field.
    Field { name: &'static str, value: &'a Value },
    /// Something non-empty without any reply field.
    Structural,
    Empty,
}

impl SendMessageResponse {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Whether the webhook reported an asynchronous execution. Any truthy
    /// `executionStarted` counts: `true`, a non-empty string, a non-zero
    /// number, or any array or object.
    pub fn execution_started(&self) -> bool {
        self.0.get("executionStarted").is_some_and(is_truthy)
    }

    /// Execution identifier accompanying `executionStarted`, if any.
    pub fn execution_id(&self) -> Option<String> {
        match self.0.get("executionId")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn shape(&self) -> ReplyShape<'_> {
        if self.execution_started() {
            return ReplyShape::ExecutionStarted;
        }
        for name in REPLY_FIELDS {
            match self.0.get(name) {
                None | Some(Value::Null) => continue,
                Some(value) => return ReplyShape::Field { name, value },
            }
        }
        if is_empty(&self.0) {
            ReplyShape::Empty
        } else {
            ReplyShape::Structural
        }
    }
}

impl From<Value> for SendMessageResponse {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Numbers and booleans have no enumerable content, so they count as empty.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Null | Value::Bool(_) | Value::Number(_) => true,
    }
}

/// Text to display for a non-streaming reply. Never fails.
///
/// Uses the first present reply field; when that yields nothing but the
/// response carries data, the whole response is shown as indented JSON.
pub fn display_text(response: &SendMessageResponse) -> String {
    let text = match response.shape() {
        ReplyShape::Field {
            value: Value::String(s),
            ..
        } => s.clone(),
        ReplyShape::Field { value, .. } => value.to_string(),
        ReplyShape::ExecutionStarted | ReplyShape::Structural | ReplyShape::Empty => String::new(),
    };

    if text.is_empty() && !is_empty(response.as_value()) {
        return serde_json::to_string_pretty(response.as_value()).unwrap_or_else(|e| {
            debug!(error = %e, "could not render response as JSON");
            String::new()
        });
    }

    text
}

/// Result of a streaming exchange.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamOutcome {
    pub has_received_chunks: bool,
}

/// Body returned when resuming a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviousSessionResponse {
    #[serde(default)]
    pub data: Vec<StoredMessage>,
}

/// A message as stored by the backend's chat memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: OriginMarker,
    #[serde(default)]
    pub kwargs: StoredMessageKwargs,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredMessageKwargs {
    #[serde(default)]
    pub content: String,
}

/// Identifies the message class, either as a name or a serialization path
/// such as `["langchain_core", "messages", "HumanMessage"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OriginMarker {
    Path(Vec<String>),
    Name(String),
}

impl OriginMarker {
    pub fn is_human(&self) -> bool {
        match self {
            OriginMarker::Path(parts) => parts.iter().any(|p| p == HUMAN_TAG),
            OriginMarker::Name(name) => name.contains(HUMAN_TAG),
        }
    }
}

impl StoredMessage {
    /// Convert to a chat message whose id is its position in the history.
    pub fn into_chat_message(self, index: usize) -> ChatMessage {
        let sender = if self.id.is_human() {
            Sender::User
        } else {
            Sender::Bot
        };
        ChatMessage {
            id: index.to_string(),
            sender,
            text: self.kwargs.content,
            files: Vec::new(),
        }
    }
}
