use crate::{
    error::{JotboardError, Result},
    storage::{validate_key, SnapshotStore},
};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::{
    path::Path,
    sync::{Mutex, MutexGuard},
};

/// SQLite-backed snapshot store using a single key-value table
pub struct SqliteSnapshotStore {
    conn: Mutex<Connection>,
}

impl SqliteSnapshotStore {
    const SCHEMA: &'static str = "CREATE TABLE IF NOT EXISTS snapshots (
        key TEXT PRIMARY KEY NOT NULL,
        contents TEXT NOT NULL
    )";

    /// Opens (or creates) the database at `database_path`
    pub fn open(database_path: impl AsRef<Path>) -> Result<Self> {
        let path = database_path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute(Self::SCHEMA, [])?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| JotboardError::StorageError("database lock poisoned".to_string()))
    }
}

#[async_trait]
impl SnapshotStore for SqliteSnapshotStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let contents = self
            .conn()?
            .query_row(
                "SELECT contents FROM snapshots WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(contents)
    }

    async fn write(&self, key: &str, contents: &str) -> Result<()> {
        validate_key(key)?;
        self.conn()?.execute(
            "INSERT INTO snapshots (key, contents) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET contents = excluded.contents",
            params![key, contents],
        )?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.conn()?
            .execute("DELETE FROM snapshots WHERE key = ?1", params![key])?;
        Ok(())
    }
}
