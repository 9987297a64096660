//! Test doubles for the transport seam.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use hookchat_common::{SessionId, TransportError};
use hookchat_config::ChatOptions;
use serde_json::Value;

use crate::message::Attachment;
use crate::response::{PreviousSessionResponse, SendMessageResponse, StreamOutcome};
use crate::transport::{StreamHandlers, Transport};

/// Records every handler call.
#[derive(Default)]
pub(crate) struct RecordingHandlers {
    chunks: Mutex<Vec<String>>,
    begins: Mutex<usize>,
    ends: Mutex<usize>,
}

impl RecordingHandlers {
    pub(crate) fn chunks(&self) -> Vec<String> {
        self.chunks.lock().unwrap().clone()
    }

    pub(crate) fn begins(&self) -> usize {
        *self.begins.lock().unwrap()
    }

    pub(crate) fn ends(&self) -> usize {
        *self.ends.lock().unwrap()
    }
}

impl StreamHandlers for RecordingHandlers {
    fn on_begin_message(&self) {
        *self.begins.lock().unwrap() += 1;
    }

    fn on_chunk(&self, chunk: &str) {
        self.chunks.lock().unwrap().push(chunk.to_string());
    }

    fn on_end_message(&self) {
        *self.ends.lock().unwrap() += 1;
    }
}

/// A transport that replays queued results. Errors are given as messages
/// and surface as `TransportError::Network`.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    history: Mutex<Option<Result<Option<PreviousSessionResponse>, String>>>,
    replies: Mutex<VecDeque<Result<Value, String>>>,
    streams: Mutex<VecDeque<Result<Vec<String>, String>>>,
    sent: Mutex<Vec<(String, SessionId, usize)>>,
    history_requests: Mutex<Vec<SessionId>>,
}

impl ScriptedTransport {
    pub(crate) fn with_history(self, history: Result<Option<PreviousSessionResponse>, String>) -> Self {
        *self.history.lock().unwrap() = Some(history);
        self
    }

    pub(crate) fn with_reply(self, reply: Result<Value, String>) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub(crate) fn with_stream(self, chunks: Result<Vec<&str>, String>) -> Self {
        let chunks = chunks.map(|c| c.into_iter().map(String::from).collect());
        self.streams.lock().unwrap().push_back(chunks);
        self
    }

    /// `(text, session id, attachment count)` per send, in call order.
    pub(crate) fn sent(&self) -> Vec<(String, SessionId, usize)> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn history_requests(&self) -> Vec<SessionId> {
        self.history_requests.lock().unwrap().clone()
    }

    fn record(&self, text: &str, session_id: &SessionId, files: &[Attachment]) {
        self.sent
            .lock()
            .unwrap()
            .push((text.to_string(), session_id.clone(), files.len()));
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn load_previous_session(
        &self,
        session_id: &SessionId,
        _options: &ChatOptions,
    ) -> Result<Option<PreviousSessionResponse>, TransportError> {
        self.history_requests.lock().unwrap().push(session_id.clone());
        match self.history.lock().unwrap().take() {
            Some(Ok(history)) => Ok(history),
            Some(Err(msg)) => Err(TransportError::Network(msg)),
            None => Ok(None),
        }
    }

    async fn send_message(
        &self,
        text: &str,
        files: &[Attachment],
        session_id: &SessionId,
        _options: &ChatOptions,
    ) -> Result<SendMessageResponse, TransportError> {
        self.record(text, session_id, files);
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Ok(value)) => Ok(SendMessageResponse::new(value)),
            Some(Err(msg)) => Err(TransportError::Network(msg)),
            None => Err(TransportError::Network("no scripted reply".into())),
        }
    }

    async fn send_message_streaming(
        &self,
        text: &str,
        files: &[Attachment],
        session_id: &SessionId,
        _options: &ChatOptions,
        handlers: &dyn StreamHandlers,
    ) -> Result<StreamOutcome, TransportError> {
        self.record(text, session_id, files);
        let next = self.streams.lock().unwrap().pop_front();
        let chunks = match next {
            Some(Ok(chunks)) => chunks,
            Some(Err(msg)) => return Err(TransportError::Network(msg)),
            None => return Err(TransportError::Network("no scripted stream".into())),
        };

        handlers.on_begin_message();
        for chunk in &chunks {
            tokio::task::yield_now().await;
            handlers.on_chunk(chunk);
        }
        handlers.on_end_message();

        Ok(StreamOutcome {
            has_received_chunks: !chunks.is_empty(),
        })
    }
}
