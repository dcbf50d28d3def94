//! Application controller.
//!
//! Owns the board and the note log manager for the lifetime of a session and
//! routes every interaction event to the component it belongs to.

use crate::{
    app::{
        event::{AppEvent, EventOutcome},
        notebook::NoteLogManager,
    },
    config::WorkspaceConfig,
    domain::{
        board::{Board, MoveOutcome},
        note::NoteLog,
    },
    error::Result,
    storage::SnapshotStore,
};
use std::sync::Arc;
use tracing::info;

pub struct AppController {
    board: Board,
    notes: NoteLogManager,
}

impl AppController {
    /// Starts a session: seeds the board and restores the note log
    pub async fn open(config: &WorkspaceConfig, store: Arc<dyn SnapshotStore>) -> Result<Self> {
        config.validate()?;

        let board = Board::new(&config.board);
        let notes = NoteLogManager::open(store, config).await?;
        info!(
            board = %config.board.name,
            tasks = board.task_count(),
            notes = notes.log().len(),
            "session started"
        );

        Ok(Self { board, notes })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn notes(&self) -> &NoteLog {
        self.notes.log()
    }

    pub fn draft(&self) -> &str {
        self.notes.draft()
    }

    pub fn draft_time_hint(&self) -> Option<String> {
        self.notes.draft_time_hint()
    }

    pub fn notebook(&self) -> &NoteLogManager {
        &self.notes
    }

    pub fn notebook_mut(&mut self) -> &mut NoteLogManager {
        &mut self.notes
    }

    /// Applies one interaction event.
    ///
    /// Errors are precondition violations (a missing source task or note);
    /// state is left untouched when one is returned. Drops on positions that
    /// do not exist are ignored.
    pub async fn dispatch(&mut self, event: AppEvent) -> Result<EventOutcome> {
        match event {
            AppEvent::DragEnded(drag) => match self.board.move_task(&drag)? {
                MoveOutcome::Moved => Ok(EventOutcome::changed()),
                MoveOutcome::Aborted | MoveOutcome::Ignored => Ok(EventOutcome::unchanged()),
            },
            AppEvent::TaskEdited {
                column,
                index,
                text,
            } => {
                self.board.edit_task(column, index, text)?;
                Ok(EventOutcome::changed())
            }
            AppEvent::DraftChanged { text } => {
                self.notes.set_draft(text);
                Ok(EventOutcome::changed())
            }
            AppEvent::KeyPressed(key) if key.is_commit() => {
                Ok(match self.notes.commit_draft().await {
                    Some(id) => EventOutcome::committed(id),
                    None => EventOutcome::unchanged(),
                })
            }
            AppEvent::KeyPressed(_) => Ok(EventOutcome::unchanged()),
            AppEvent::EntryEdited { index, text } => {
                self.notes.edit_entry(index, text).await?;
                Ok(EventOutcome::changed())
            }
            AppEvent::EntryDeleted { index } => {
                self.notes.delete_entry(index).await?;
                Ok(EventOutcome::changed())
            }
        }
    }
}
