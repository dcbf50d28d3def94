//! Workspace configuration.
//!
//! Stored as JSON; every field has a default so partial files are accepted.

use crate::{
    domain::{board::BoardConfig, note::TimeFormat},
    error::{JotboardError, Result},
    storage::validate_key,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Key the note log snapshot is stored under
    pub snapshot_key: String,
    pub time_format: TimeFormat,
    pub board: BoardConfig,
}

impl WorkspaceConfig {
    pub const DEFAULT_SNAPSHOT_KEY: &'static str = "notes";

    /// Loads configuration from a JSON file.
    ///
    /// A missing file yields the defaults.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).await.map_err(|err| {
            JotboardError::ConfigError(format!("cannot read {}: {}", path.display(), err))
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(contents)
            .map_err(|err| JotboardError::ConfigError(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_key(&self.snapshot_key)
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            snapshot_key: Self::DEFAULT_SNAPSHOT_KEY.to_string(),
            time_format: TimeFormat::default(),
            board: BoardConfig::default(),
        }
    }
}
