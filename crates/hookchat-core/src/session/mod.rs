//! Conversation session management.
//!
//! A `ChatSession` owns the message list, the active session id and the
//! pending flag, and folds webhook replies (whole or streamed) into the
//! message list.

mod chat;
mod manager;
mod types;


pub use manager::ChatSession;
pub use types::{ERROR_REPLY_TEXT, NO_RESPONSE_NOTICE};
