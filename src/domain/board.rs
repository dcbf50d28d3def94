use crate::{
    domain::gesture::{DragLocation, DragResult},
    error::{JotboardError, Result},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::debug;

/// One of the three fixed board columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnId {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

impl ColumnId {
    pub const ALL: [ColumnId; 3] = [ColumnId::ToDo, ColumnId::InProgress, ColumnId::Done];

    /// Display name of the column
    pub fn name(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    fn slot(self) -> usize {
        match self {
            Self::ToDo => 0,
            Self::InProgress => 1,
            Self::Done => 2,
        }
    }
}

impl FromStr for ColumnId {
    type Err = JotboardError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|col| col.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| JotboardError::UnknownColumn(s.to_string()))
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Initial tasks for a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSeed {
    pub column: ColumnId,
    pub tasks: Vec<String>,
}

impl ColumnSeed {
    pub fn new(column: ColumnId, tasks: Vec<String>) -> Self {
        Self { column, tasks }
    }
}

/// Board configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub name: String,
    pub seed: Vec<ColumnSeed>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        let sample = || vec!["Sample Task 1".to_string(), "Sample Task 2".to_string()];
        Self {
            name: "Board".to_string(),
            seed: ColumnId::ALL
                .into_iter()
                .map(|col| ColumnSeed::new(col, sample()))
                .collect(),
        }
    }
}

/// Result of applying a drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// The gesture had no destination; the board is unchanged
    Aborted,
    /// The destination position does not exist; the board is unchanged
    Ignored,
}

/// Kanban board state.
///
/// Tasks are plain strings addressed by column and position. The board only
/// changes through [`Board::move_task`] and [`Board::edit_task`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    columns: [Vec<String>; 3],
}

impl Board {
    pub fn new(config: &BoardConfig) -> Self {
        let mut board = Self::empty();
        for seed in &config.seed {
            board
                .column_mut(seed.column)
                .extend(seed.tasks.iter().cloned());
        }
        board
    }

    pub fn empty() -> Self {
        Self {
            columns: [Vec::new(), Vec::new(), Vec::new()],
        }
    }

    /// Tasks of a column in display order
    pub fn tasks(&self, column: ColumnId) -> &[String] {
        &self.columns[column.slot()]
    }

    /// All columns in display order
    pub fn columns(&self) -> impl Iterator<Item = (ColumnId, &[String])> {
        ColumnId::ALL.into_iter().map(|col| (col, self.tasks(col)))
    }

    /// Total number of tasks across all columns
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    fn column_mut(&mut self, column: ColumnId) -> &mut Vec<String> {
        &mut self.columns[column.slot()]
    }

    /// Applies a completed drag gesture.
    ///
    /// A gesture without destination, or with a destination position that
    /// does not exist, is a no-op. Only a missing source task is an error.
    /// Indices are checked before anything is removed.
    pub fn move_task(&mut self, drag: &DragResult) -> Result<MoveOutcome> {
        let Some(destination) = drag.destination else {
            debug!(column = %drag.source.column_id, index = drag.source.index, "drop outside board ignored");
            return Ok(MoveOutcome::Aborted);
        };

        self.relocate(drag.source, destination)
    }

    fn relocate(&mut self, source: DragLocation, destination: DragLocation) -> Result<MoveOutcome> {
        let source_len = self.tasks(source.column_id).len();
        if source.index >= source_len {
            return Err(JotboardError::out_of_range(
                source.column_id.name(),
                source.index,
                source_len,
            ));
        }

        // Same-column reorders address the list after the card was lifted out
        let dest_len = self.tasks(destination.column_id).len();
        let max_insert = if source.column_id == destination.column_id {
            source_len - 1
        } else {
            dest_len
        };
        if destination.index > max_insert {
            debug!(
                column = %destination.column_id,
                index = destination.index,
                len = dest_len,
                "drop on missing position ignored"
            );
            return Ok(MoveOutcome::Ignored);
        }

        let task = self.column_mut(source.column_id).remove(source.index);
        self.column_mut(destination.column_id)
            .insert(destination.index, task);

        debug!(
            from = %source.column_id,
            from_index = source.index,
            to = %destination.column_id,
            to_index = destination.index,
            "task moved"
        );
        Ok(MoveOutcome::Moved)
    }

    /// Replaces the text of a task in place. Empty text is allowed.
    pub fn edit_task(&mut self, column: ColumnId, index: usize, text: impl Into<String>) -> Result<()> {
        let tasks = self.column_mut(column);
        let len = tasks.len();
        let slot = tasks
            .get_mut(index)
            .ok_or_else(|| JotboardError::out_of_range(column.name(), index, len))?;
        *slot = text.into();

        debug!(column = %column, index, "task edited");
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(&BoardConfig::default())
    }
}
