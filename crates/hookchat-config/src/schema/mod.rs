//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod chat;
mod system;

pub use chat::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HookchatConfig {
    pub chat: ChatOptions,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}
