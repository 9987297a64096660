//! Chat session engine for webhook-backed chat widgets.
//!
//! Provides:
//! - `ChatSession`: message list, session lifecycle, pending flag
//! - Streaming reconciliation of partial replies into one growing message
//! - A reqwest-based webhook `Transport` with NDJSON streaming
//! - Key-value stores for remembering the last session id
//! - A WebSocket handle for replies delivered out of band

pub mod live_socket;
pub mod message;
pub mod observable;
pub mod response;
pub mod session;
pub mod store;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use live_socket::LiveSocket;
pub use message::{Attachment, ChatMessage, Sender};
pub use observable::Observable;
pub use response::{
    display_text, OriginMarker, PreviousSessionResponse, ReplyShape, SendMessageResponse,
    StoredMessage, StreamOutcome,
};
pub use session::{ChatSession, ERROR_REPLY_TEXT, NO_RESPONSE_NOTICE};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use transport::{StreamHandlers, Transport, WebhookTransport};

pub use hookchat_common::{ChatError, SessionId, StoreError, TransportError};
pub use hookchat_config::ChatOptions;
