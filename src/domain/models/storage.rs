use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

/// Key holding the serialized conversation, a JSON array of messages.
pub const CONVERSATION_KEY: &str = "conversation";
/// Key holding the number of questions already asked, a decimal string.
pub const ASKED_COUNT_KEY: &str = "asked-count";

/// Flat string key/value persistence for session snapshots. Values are
/// opaque to the adapter; the services own the formats.
#[async_trait]
pub trait Storage {
    async fn load(&self, key: &str) -> Result<Option<String>>;
    async fn save(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

pub type StorageArc = Arc<dyn Storage + Send + Sync>;
