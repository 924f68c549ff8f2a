#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::models::Storage;

/// Keeps session state for the lifetime of the process. Used when running
/// with `--ephemeral`, and by tests.
#[derive(Default)]
pub struct MemoryStorage {
    entries: DashMap<String, String>,
}

#[async_trait]
impl Storage for MemoryStorage {
    #[allow(clippy::implicit_return)]
    async fn load(&self, key: &str) -> Result<Option<String>> {
        return Ok(self
            .entries
            .get(key)
            .map(|entry| return entry.value().to_string()));
    }

    #[allow(clippy::implicit_return)]
    async fn save(&self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        return Ok(());
    }
}
