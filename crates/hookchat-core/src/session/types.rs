//! Pending-flag guard, streaming target and fixed notices.

use tracing::{debug, trace};

use crate::message::ChatMessage;
use crate::observable::Observable;
use crate::transport::StreamHandlers;

/// Bot reply appended when the exchange fails.
pub const ERROR_REPLY_TEXT: &str = "Error: Failed to receive response";

/// Placeholder text when a streaming exchange delivered no chunk.
pub const NO_RESPONSE_NOTICE: &str = "[No response received. This could happen if streaming is enabled in the trigger but disabled in agent node(s)]";

/// Raises the pending flag and lowers it on drop, so every exit path
/// (including a dropped future) clears it.
pub(crate) struct PendingGuard<'a> {
    flag: &'a Observable<bool>,
}

impl<'a> PendingGuard<'a> {
    pub(crate) fn raise(flag: &'a Observable<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// Accumulates streamed chunks into one bot message, found by id.
pub(crate) struct StreamTarget<'a> {
    pub(crate) messages: &'a Observable<Vec<ChatMessage>>,
    pub(crate) target_id: String,
}

impl StreamTarget<'_> {
    /// Run `f` on the target message. Returns `false` when it is gone or is
    /// not a bot message.
    pub(crate) fn modify(&self, f: impl FnOnce(&mut ChatMessage)) -> bool {
        self.messages.update_if(|messages| {
            match messages.iter_mut().rev().find(|m| m.id == self.target_id) {
                Some(message) if message.is_bot() => {
                    f(message);
                    true
                }
                _ => false,
            }
        })
    }
}

impl StreamHandlers for StreamTarget<'_> {
    fn on_begin_message(&self) {
        trace!(target_id = %self.target_id, "stream message begin");
    }

    fn on_chunk(&self, chunk: &str) {
        if !self.modify(|message| message.text.push_str(chunk)) {
            debug!(target_id = %self.target_id, "dropping chunk, stream target missing");
        }
    }

    fn on_end_message(&self) {
        trace!(target_id = %self.target_id, "stream message end");
    }
}
