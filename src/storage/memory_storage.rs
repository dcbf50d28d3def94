use crate::{
    error::{JotboardError, Result},
    storage::{validate_key, SnapshotStore},
};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex, MutexGuard,
    },
};

/// In-memory snapshot store.
///
/// Counts successful writes and can be told to fail them, so callers can
/// observe exactly when a snapshot is taken.
#[derive(Default)]
pub struct MemorySnapshotStore {
    entries: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `contents` under `key`
    pub fn with_snapshot(key: &str, contents: &str) -> Self {
        Self {
            entries: Mutex::new(HashMap::from([(key.to_string(), contents.to_string())])),
            ..Self::default()
        }
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Makes every following write fail until reset
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Current value under `key`
    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().ok()?.get(key).cloned()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| JotboardError::StorageError("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        Ok(self.lock()?.get(key).cloned())
    }

    async fn write(&self, key: &str, contents: &str) -> Result<()> {
        validate_key(key)?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(JotboardError::StorageError("quota exceeded".to_string()));
        }

        self.lock()?.insert(key.to_string(), contents.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_and_read() {
        let store = MemorySnapshotStore::new();

        assert_eq!(store.read("notes").await.unwrap(), None);
        store.write("notes", "[]").await.unwrap();

        assert_eq!(store.read("notes").await.unwrap().as_deref(), Some("[]"));
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_writes_are_not_counted() {
        let store = MemorySnapshotStore::with_snapshot("notes", "old");
        store.set_fail_writes(true);

        assert!(store.write("notes", "new").await.is_err());
        assert_eq!(store.write_count(), 0);
        assert_eq!(store.get("notes").as_deref(), Some("old"));

        store.set_fail_writes(false);
        store.write("notes", "new").await.unwrap();
        assert_eq!(store.get("notes").as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_remove() {
        let store = MemorySnapshotStore::with_snapshot("notes", "x");

        store.remove("notes").await.unwrap();
        store.remove("notes").await.unwrap();

        assert_eq!(store.get("notes"), None);
    }
}
