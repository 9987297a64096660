//! Exchange with the chat webhook.
//!
//! `Transport` is the seam between `ChatSession` and the network;
//! `WebhookTransport` is the reqwest implementation.

mod api;
mod ndjson;
mod webhook;

#[cfg(test)]
mod tests;

pub use webhook::WebhookTransport;

use async_trait::async_trait;
use hookchat_common::{SessionId, TransportError};
use hookchat_config::ChatOptions;

use crate::message::Attachment;
use crate::response::{PreviousSessionResponse, SendMessageResponse, StreamOutcome};

/// Callbacks invoked while a streamed reply arrives.
pub trait StreamHandlers: Send + Sync {
    fn on_begin_message(&self) {}

    fn on_chunk(&self, chunk: &str);

    fn on_end_message(&self) {}
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch the stored history of `session_id`. `None` when the backend
    /// returned no body.
    async fn load_previous_session(
        &self,
        session_id: &SessionId,
        options: &ChatOptions,
    ) -> Result<Option<PreviousSessionResponse>, TransportError>;

    async fn send_message(
        &self,
        text: &str,
        files: &[Attachment],
        session_id: &SessionId,
        options: &ChatOptions,
    ) -> Result<SendMessageResponse, TransportError>;

    /// Send and deliver the reply piecewise through `handlers`.
    async fn send_message_streaming(
        &self,
        text: &str,
        files: &[Attachment],
        session_id: &SessionId,
        options: &ChatOptions,
        handlers: &dyn StreamHandlers,
    ) -> Result<StreamOutcome, TransportError>;
}
