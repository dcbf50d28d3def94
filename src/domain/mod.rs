pub mod board;
pub mod gesture;
pub mod note;

pub use board::{Board, BoardConfig, ColumnId, ColumnSeed, MoveOutcome};
pub use gesture::{DragLocation, DragResult};
pub use note::{Draft, Note, NoteEntry, NoteId, NoteLog, TimeFormat};
