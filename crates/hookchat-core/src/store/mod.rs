//! Durable key-value storage for the session id.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use hookchat_common::StoreError;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrites any existing value; the last writer wins.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
