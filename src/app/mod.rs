pub mod controller;
pub mod event;
pub mod notebook;

pub use controller::AppController;
pub use event::{AppEvent, EventOutcome, KeyPress};
pub use notebook::NoteLogManager;
