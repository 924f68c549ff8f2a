pub mod disk;
pub mod memory;

use std::sync::Arc;

pub use disk::DiskStorage;
pub use memory::MemoryStorage;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::StorageArc;

/// Picks the storage adapter for this run. `--ephemeral` keeps everything in
/// memory and leaves nothing behind on disk.
pub fn session_storage() -> StorageArc {
    if Config::get(ConfigKey::Ephemeral) == "true" {
        return Arc::<MemoryStorage>::default();
    }

    return Arc::new(DiskStorage::default());
}
