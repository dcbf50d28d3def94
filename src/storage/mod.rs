use crate::error::{JotboardError, Result};
use async_trait::async_trait;

#[cfg(feature = "file-storage")]
pub mod file_storage;
pub mod memory_storage;

#[cfg(feature = "sqlite-storage")]
pub mod sqlite_storage;

#[cfg(feature = "file-storage")]
pub use file_storage::FileSnapshotStore;
pub use memory_storage::MemorySnapshotStore;

#[cfg(feature = "sqlite-storage")]
pub use sqlite_storage::SqliteSnapshotStore;

/// Local key-value store holding serialized snapshots.
///
/// Values are opaque text; callers own the format.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Reads the snapshot stored under `key`, if any
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the snapshot stored under `key`
    async fn write(&self, key: &str, contents: &str) -> Result<()>;

    /// Removes the snapshot stored under `key`; a missing key is not an error
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Checks that a key is usable by every backend (including as a file name)
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(JotboardError::InvalidSnapshotKey(key.to_string()))
    }
}
