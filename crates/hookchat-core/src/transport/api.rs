//! Transport trait implementation for WebhookTransport.

use std::time::Duration;

use async_trait::async_trait;
use hookchat_common::{SessionId, TransportError};
use hookchat_config::ChatOptions;
use serde_json::Value;
use tracing::debug;

use crate::message::Attachment;
use crate::response::{PreviousSessionResponse, SendMessageResponse, StreamOutcome};

use super::ndjson::read_response_frames;
use super::webhook::{WebhookTransport, ACTION_LOAD_PREVIOUS_SESSION, ACTION_SEND_MESSAGE};
use super::{StreamHandlers, Transport};

fn request_timeout(options: &ChatOptions) -> Duration {
    Duration::from_secs(u64::from(options.request_timeout_secs))
}

#[async_trait]
impl Transport for WebhookTransport {
    async fn load_previous_session(
        &self,
        session_id: &SessionId,
        options: &ChatOptions,
    ) -> Result<Option<PreviousSessionResponse>, TransportError> {
        debug!(session = %session_id, url = %options.webhook_url, "loading previous session");

        let request = self
            .build_request(ACTION_LOAD_PREVIOUS_SESSION, session_id, None, &[], options)?
            .timeout(request_timeout(options));
        let body = self
            .dispatch(request)
            .await?
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if body.trim().is_empty() {
            return Ok(None);
        }
        let value: Value =
            serde_json::from_str(&body).map_err(|e| TransportError::Parse(e.to_string()))?;
        if value.is_null() {
            return Ok(None);
        }
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| TransportError::Parse(e.to_string()))
    }

    async fn send_message(
        &self,
        text: &str,
        files: &[Attachment],
        session_id: &SessionId,
        options: &ChatOptions,
    ) -> Result<SendMessageResponse, TransportError> {
        debug!(session = %session_id, files = files.len(), "sending message");

        let request = self
            .build_request(ACTION_SEND_MESSAGE, session_id, Some(text), files, options)?
            .timeout(request_timeout(options));
        let body = self
            .dispatch(request)
            .await?
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if body.trim().is_empty() {
            return Ok(SendMessageResponse::new(Value::Object(Default::default())));
        }
        serde_json::from_str::<Value>(&body)
            .map(SendMessageResponse::new)
            .map_err(|e| TransportError::Parse(e.to_string()))
    }

    async fn send_message_streaming(
        &self,
        text: &str,
        files: &[Attachment],
        session_id: &SessionId,
        options: &ChatOptions,
        handlers: &dyn StreamHandlers,
    ) -> Result<StreamOutcome, TransportError> {
        debug!(session = %session_id, files = files.len(), "sending streaming message");

        // No whole-request timeout: a healthy stream may outlive it.
        let request =
            self.build_request(ACTION_SEND_MESSAGE, session_id, Some(text), files, options)?;
        let response = self.dispatch(request).await?;

        let outcome = read_response_frames(response, handlers).await?;
        debug!(
            session = %session_id,
            received = outcome.has_received_chunks,
            "stream finished"
        );
        Ok(outcome)
    }
}
