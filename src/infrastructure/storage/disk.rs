#[cfg(test)]
#[path = "disk_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Storage;

/// Persists session state as one flat file per key so conversations survive
/// restarts. The directory is created lazily on the first save.
pub struct DiskStorage {
    session_dir: path::PathBuf,
}

impl Default for DiskStorage {
    fn default() -> DiskStorage {
        let configured = Config::get(ConfigKey::SessionDir);
        if !configured.is_empty() {
            return DiskStorage::new(path::PathBuf::from(configured));
        }

        let session_dir = dirs::cache_dir().unwrap().join("innobot/session");
        return DiskStorage::new(session_dir);
    }
}

impl DiskStorage {
    pub fn new(session_dir: path::PathBuf) -> DiskStorage {
        return DiskStorage { session_dir };
    }

    pub fn dir(&self) -> &path::Path {
        return self.session_dir.as_path();
    }

    fn file_path(&self, key: &str) -> path::PathBuf {
        return self.session_dir.join(key);
    }
}

#[async_trait]
impl Storage for DiskStorage {
    #[allow(clippy::implicit_return)]
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let file_path = self.file_path(key);
        if !file_path.exists() {
            return Ok(None);
        }

        let payload = fs::read_to_string(file_path).await?;
        return Ok(Some(payload));
    }

    #[allow(clippy::implicit_return)]
    async fn save(&self, key: &str, value: &str) -> Result<()> {
        if !self.session_dir.exists() {
            fs::create_dir_all(&self.session_dir).await?;
        }

        let mut file = fs::File::create(self.file_path(key)).await?;
        file.write_all(value.as_bytes()).await?;

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn remove(&self, key: &str) -> Result<()> {
        let file_path = self.file_path(key);
        if !file_path.exists() {
            return Ok(());
        }

        fs::remove_file(file_path).await?;
        return Ok(());
    }
}
