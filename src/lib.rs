//! # Jotboard Core
//!
//! State model for a single-page workspace: a fixed three-column task board
//! with drag-and-drop reordering, and a chronological note log with
//! per-entry timestamps that is snapshotted to a local store.
//!
//! Rendering and gesture detection belong to the UI layer; this crate only
//! consumes completed interaction events and exposes read-only state.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod storage;

// Re-export commonly used types
pub use app::{AppController, AppEvent, EventOutcome, KeyPress, NoteLogManager};
pub use config::WorkspaceConfig;
pub use domain::{
    board::{Board, BoardConfig, ColumnId, MoveOutcome},
    gesture::{DragLocation, DragResult},
    note::{NoteEntry, NoteId, NoteLog},
};
pub use error::{JotboardError, Result};
pub use storage::SnapshotStore;
