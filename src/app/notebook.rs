use crate::{
    config::WorkspaceConfig,
    domain::note::{Draft, NoteEntry, NoteId, NoteLog, TimeFormat},
    error::{JotboardError, Result},
    storage::{validate_key, SnapshotStore},
};
use chrono::{DateTime, Local, TimeZone};
use std::{fmt, sync::Arc};
use tracing::{debug, info, warn};

/// Owns the note log and the draft line, and snapshots the log after every
/// change.
pub struct NoteLogManager {
    log: NoteLog,
    draft: Draft,
    store: Arc<dyn SnapshotStore>,
    snapshot_key: String,
    time_format: TimeFormat,
}

impl NoteLogManager {
    /// Creates the manager and restores the log saved under the configured key
    pub async fn open(store: Arc<dyn SnapshotStore>, config: &WorkspaceConfig) -> Result<Self> {
        validate_key(&config.snapshot_key)?;

        let mut manager = Self {
            log: NoteLog::new(),
            draft: Draft::default(),
            store,
            snapshot_key: config.snapshot_key.clone(),
            time_format: config.time_format.clone(),
        };
        manager.restore().await;
        Ok(manager)
    }

    async fn restore(&mut self) {
        let snapshot = match self.store.read(&self.snapshot_key).await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                debug!(key = %self.snapshot_key, "no note snapshot, starting empty");
                return;
            }
            Err(err) => {
                warn!(key = %self.snapshot_key, error = %err, "note snapshot unreadable, starting empty");
                return;
            }
        };

        match NoteLog::from_snapshot(&snapshot) {
            Ok(log) => {
                info!(key = %self.snapshot_key, entries = log.len(), "note log restored");
                self.log = log;
            }
            Err(err) => {
                warn!(key = %self.snapshot_key, error = %err, "malformed note snapshot ignored");
            }
        }
    }

    pub fn log(&self) -> &NoteLog {
        &self.log
    }

    pub fn draft(&self) -> &str {
        self.draft.as_str()
    }

    pub fn time_format(&self) -> &TimeFormat {
        &self.time_format
    }

    /// Replaces the draft verbatim
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft.set(text);
    }

    /// Time to show beside the draft line, if it has any content
    pub fn draft_time_hint(&self) -> Option<String> {
        self.draft.time_hint(&self.time_format, &Local::now())
    }

    /// Commits the draft stamped with the current local time
    pub async fn commit_draft(&mut self) -> Option<NoteId> {
        self.commit_draft_at(&Local::now()).await
    }

    /// Appends the draft as a new entry stamped with `now`.
    ///
    /// A blank draft is left as is and nothing is appended.
    pub async fn commit_draft_at<Tz>(&mut self, now: &DateTime<Tz>) -> Option<NoteId>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        if self.draft.is_blank() {
            debug!("blank draft not committed");
            return None;
        }

        let time = self.time_format.format(now);
        let id = self.log.append(NoteEntry::new(self.draft.take(), time));
        debug!(note = %id, entries = self.log.len(), "note appended");

        self.after_mutation().await;
        Some(id)
    }

    /// Replaces the text of the entry at `index`; its time is not restamped
    pub async fn edit_entry(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        self.log.edit(index, text)?;
        debug!(index, "note edited");

        self.after_mutation().await;
        Ok(())
    }

    /// Removes the entry at `index`
    pub async fn delete_entry(&mut self, index: usize) -> Result<NoteEntry> {
        let removed = self.log.delete(index)?;
        debug!(index, entries = self.log.len(), "note deleted");

        self.after_mutation().await;
        Ok(removed)
    }

    pub async fn edit_entry_by_id(&mut self, id: NoteId, text: impl Into<String>) -> Result<()> {
        let index = self.index_of(id)?;
        self.edit_entry(index, text).await
    }

    pub async fn delete_entry_by_id(&mut self, id: NoteId) -> Result<NoteEntry> {
        let index = self.index_of(id)?;
        self.delete_entry(index).await
    }

    fn index_of(&self, id: NoteId) -> Result<usize> {
        self.log
            .position_of(id)
            .ok_or_else(|| JotboardError::NoteNotFound(id.to_string()))
    }

    /// Writes the whole log to the snapshot store
    pub async fn persist(&self) -> Result<()> {
        let snapshot = self.log.to_snapshot()?;
        self.store.write(&self.snapshot_key, &snapshot).await
    }

    // Write failures must not undo or fail the mutation that caused them.
    async fn after_mutation(&self) {
        if let Err(err) = self.persist().await {
            warn!(key = %self.snapshot_key, error = %err, "failed to save note snapshot");
        }
    }
}
