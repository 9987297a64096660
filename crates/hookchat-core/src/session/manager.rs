//! ChatSession struct and session lifecycle.

use std::sync::Arc;

use hookchat_common::{Result, SessionId};
use hookchat_config::ChatOptions;
use tracing::{debug, info, warn};

use crate::live_socket::LiveSocket;
use crate::message::ChatMessage;
use crate::observable::Observable;
use crate::store::KeyValueStore;
use crate::transport::Transport;

/// State and operations behind one chat widget.
///
/// All operations take `&self`. Sends are not serialized: callers must not
/// start a send while `waiting_for_response()` is `true`.
pub struct ChatSession {
    /// Options fixed at construction.
    pub(super) options: ChatOptions,
    /// Webhook exchange (plain, streaming, history).
    pub(super) transport: Arc<dyn Transport>,
    /// Where the last session id is remembered.
    pub(super) store: Arc<dyn KeyValueStore>,
    /// Conversation, oldest first.
    pub(super) messages: Observable<Vec<ChatMessage>>,
    /// Active session; `None` until started or resumed.
    pub(super) current_session_id: Observable<Option<SessionId>>,
    /// Whether a send is outstanding.
    pub(super) waiting_for_response: Observable<bool>,
    /// Socket delivering replies to asynchronous executions.
    pub(super) live_socket: Observable<Option<LiveSocket>>,
    /// Greeting bot messages derived from the options.
    pub(super) initial_messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(
        options: ChatOptions,
        transport: Arc<dyn Transport>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let initial_messages = options
            .initial_messages
            .iter()
            .map(|text| ChatMessage::bot(text.as_str()))
            .collect();

        Self {
            options,
            transport,
            store,
            messages: Observable::new(Vec::new()),
            current_session_id: Observable::new(None),
            waiting_for_response: Observable::new(false),
            live_socket: Observable::new(None),
            initial_messages,
        }
    }

    pub fn options(&self) -> &ChatOptions {
        &self.options
    }

    /// The conversation, oldest first.
    pub fn messages(&self) -> &Observable<Vec<ChatMessage>> {
        &self.messages
    }

    pub fn current_session_id(&self) -> &Observable<Option<SessionId>> {
        &self.current_session_id
    }

    /// `true` while a send is outstanding.
    pub fn waiting_for_response(&self) -> &Observable<bool> {
        &self.waiting_for_response
    }

    pub fn live_socket(&self) -> &Observable<Option<LiveSocket>> {
        &self.live_socket
    }

    /// Greeting bot messages from `initial_messages`, shown before any
    /// session activity.
    pub fn initial_messages(&self) -> &[ChatMessage] {
        &self.initial_messages
    }

    /// Start a fresh session and persist its id.
    ///
    /// The previous session's messages stay in the list. A persistence
    /// failure is logged and does not fail the call.
    pub async fn start_new_session(&self) -> SessionId {
        let session_id = SessionId::new();
        self.current_session_id.set(Some(session_id.clone()));

        if let Err(e) = self
            .store
            .set(&self.options.session_storage_key, session_id.as_str())
            .await
        {
            warn!(error = %e, "failed to persist session id");
        }

        info!(session = %session_id, "started new session");
        session_id
    }

    /// Resume the last persisted session, if enabled.
    ///
    /// Returns `None` when resuming is disabled, otherwise the id that was
    /// looked up. The id only becomes current, and the message list is only
    /// replaced, when the backend returns at least one message.
    pub async fn load_previous_session(&self) -> Result<Option<SessionId>> {
        if !self.options.load_previous_session {
            return Ok(None);
        }

        let session_id = self
            .store
            .get(&self.options.session_storage_key)
            .await?
            .filter(|id| !id.trim().is_empty())
            .map(SessionId::from)
            .unwrap_or_default();

        let history = self
            .transport
            .load_previous_session(&session_id, &self.options)
            .await?;

        let loaded: Vec<ChatMessage> = history
            .map(|h| h.data)
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, stored)| stored.into_chat_message(index))
            .collect();

        if loaded.is_empty() {
            debug!(session = %session_id, "no previous messages, nothing to resume");
        } else {
            info!(session = %session_id, count = loaded.len(), "resumed previous session");
            self.messages.set(loaded);
            self.current_session_id.set(Some(session_id.clone()));
        }

        Ok(Some(session_id))
    }

    /// Append a bot message received out of band, e.g. over the live socket.
    pub fn push_bot_message(&self, text: impl Into<String>) -> ChatMessage {
        let message = ChatMessage::bot(text);
        let appended = message.clone();
        self.messages.update(|m| m.push(appended));
        message
    }

    /// Keep `socket` as the session's live socket, closing any previous one.
    pub async fn attach_live_socket(&self, socket: LiveSocket) {
        let previous = self.live_socket.get();
        self.live_socket.set(Some(socket));
        if let Some(previous) = previous {
            previous.close().await;
        }
    }

    /// Close and forget the live socket. Does not cancel an in-flight send.
    pub async fn close_live_socket(&self) {
        let current = self.live_socket.get();
        if let Some(socket) = current {
            socket.close().await;
            self.live_socket.set(None);
            debug!(url = %socket.url(), "live socket closed");
        }
    }
}
