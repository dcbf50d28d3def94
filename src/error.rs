use thiserror::Error;

pub type Result<T> = std::result::Result<T, JotboardError>;

#[derive(Debug, Error)]
pub enum JotboardError {
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Index {index} out of range for {target} (len {len})")]
    IndexOutOfRange {
        target: String,
        index: usize,
        len: usize,
    },

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Invalid snapshot key: {0:?}")]
    InvalidSnapshotKey(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl JotboardError {
    pub(crate) fn out_of_range(target: impl Into<String>, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            target: target.into(),
            index,
            len,
        }
    }
}

#[cfg(feature = "sqlite-storage")]
impl From<rusqlite::Error> for JotboardError {
    fn from(err: rusqlite::Error) -> Self {
        Self::StorageError(err.to_string())
    }
}
