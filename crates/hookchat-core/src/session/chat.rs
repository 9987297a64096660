//! Send operations for ChatSession (whole reply + streaming).

use hookchat_common::{ChatError, Result, SessionId};
use tracing::{debug, error};

use crate::message::{Attachment, ChatMessage};
use crate::response::{display_text, SendMessageResponse};

use super::manager::ChatSession;
use super::types::{PendingGuard, StreamTarget, ERROR_REPLY_TEXT, NO_RESPONSE_NOTICE};

impl ChatSession {
    /// Append the user's message and fold the webhook reply into the list.
    ///
    /// Returns `Ok(Some(response))` only when the webhook reports that the
    /// execution started asynchronously; the reply then arrives out of band.
    /// Transport failures become an error bot message and never surface
    /// here. The only error is `ChatError::NoActiveSession`.
    pub async fn send_message(
        &self,
        text: &str,
        files: Vec<Attachment>,
    ) -> Result<Option<SendMessageResponse>> {
        let sent = ChatMessage::user(text, files);
        let files = sent.files.clone();
        self.messages.update(|m| m.push(sent));

        let _pending = PendingGuard::raise(&self.waiting_for_response);

        let session_id = self
            .current_session_id
            .get()
            .ok_or(ChatError::NoActiveSession)?;

        if self.options.enable_streaming {
            self.exchange_streaming(text, &files, &session_id).await;
            Ok(None)
        } else {
            Ok(self.exchange(text, &files, &session_id).await)
        }
    }

    async fn exchange(
        &self,
        text: &str,
        files: &[Attachment],
        session_id: &SessionId,
    ) -> Option<SendMessageResponse> {
        let response = match self
            .transport
            .send_message(text, files, session_id, &self.options)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!(session = %session_id, error = %e, "chat webhook request failed");
                self.push_bot_message(ERROR_REPLY_TEXT);
                return None;
            }
        };

        if response.execution_started() {
            debug!(session = %session_id, "execution started, reply will arrive out of band");
            return Some(response);
        }

        self.push_bot_message(display_text(&response));
        None
    }

    async fn exchange_streaming(&self, text: &str, files: &[Attachment], session_id: &SessionId) {
        let placeholder = ChatMessage::bot(String::new());
        let target = StreamTarget {
            messages: &self.messages,
            target_id: placeholder.id.clone(),
        };
        self.messages.update(|m| m.push(placeholder));

        let result = self
            .transport
            .send_message_streaming(text, files, session_id, &self.options, &target)
            .await;

        match result {
            Ok(outcome) if !outcome.has_received_chunks => {
                debug!(session = %session_id, "stream ended without chunks");
                target.modify(|message| message.text = NO_RESPONSE_NOTICE.to_string());
            }
            Ok(_) => {}
            Err(e) => {
                error!(session = %session_id, error = %e, "chat webhook stream failed");
                self.push_bot_message(ERROR_REPLY_TEXT);
            }
        }
    }
}
