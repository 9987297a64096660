//! Shared types for the hookchat workspace: identifiers and error enums.

pub mod errors;
pub mod id;

pub use errors::{ChatError, ConfigError, StoreError, TransportError};
pub use id::{new_id, SessionId};

pub type Result<T> = std::result::Result<T, ChatError>;
