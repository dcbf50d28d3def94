use crate::{
    error::Result,
    storage::{validate_key, SnapshotStore},
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based snapshot store: one JSON file per key
pub struct FileSnapshotStore {
    root_path: PathBuf,
}

impl FileSnapshotStore {
    const STORE_DIR: &'static str = ".jotboard";
    const SNAPSHOT_EXT: &'static str = "json";
    const TMP_EXT: &'static str = "json.tmp";

    /// Creates a store under `<project_root>/.jotboard`
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::STORE_DIR),
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    fn snapshot_file(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self
            .root_path
            .join(format!("{}.{}", key, Self::SNAPSHOT_EXT)))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let file_path = self.snapshot_file(key)?;

        if !file_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&file_path).await?;
        Ok(Some(contents))
    }

    async fn write(&self, key: &str, contents: &str) -> Result<()> {
        let file_path = self.snapshot_file(key)?;
        self.ensure_directory_exists(&self.root_path).await?;

        // Replace by rename so an interrupted write never leaves a torn snapshot
        let tmp_path = file_path.with_extension(Self::TMP_EXT);
        fs::write(&tmp_path, contents).await?;
        fs::rename(&tmp_path, &file_path).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let file_path = self.snapshot_file(key)?;

        if file_path.exists() {
            fs::remove_file(file_path).await?;
        }
        Ok(())
    }
}
