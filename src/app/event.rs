//! Interaction events delivered by the UI layer

use crate::domain::{board::ColumnId, gesture::DragResult, note::NoteId};
use serde::{Deserialize, Serialize};

/// A key pressed while the draft line has focus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    pub key: String,
    #[serde(default)]
    pub shift: bool,
}

impl KeyPress {
    pub const ENTER: &'static str = "Enter";

    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            shift: false,
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Enter without Shift finalizes the draft
    pub fn is_commit(&self) -> bool {
        self.key == Self::ENTER && !self.shift
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// A drag gesture on the board completed
    DragEnded(DragResult),
    TaskEdited {
        column: ColumnId,
        index: usize,
        text: String,
    },
    /// The draft line changed
    DraftChanged { text: String },
    KeyPressed(KeyPress),
    EntryEdited { index: usize, text: String },
    EntryDeleted { index: usize },
}

/// What the UI layer should do after an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// Visible state changed and should be redrawn
    pub changed: bool,
    /// The input surface must not apply its default action for the event
    pub prevent_default: bool,
    /// Note created by a commit, if any
    pub created: Option<NoteId>,
}

impl EventOutcome {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn changed() -> Self {
        Self {
            changed: true,
            ..Self::default()
        }
    }

    pub fn committed(id: NoteId) -> Self {
        Self {
            changed: true,
            prevent_default: true,
            created: Some(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gesture::DragLocation;

    #[test]
    fn test_commit_key_detection() {
        assert!(KeyPress::new("Enter").is_commit());
        assert!(!KeyPress::new("Enter").with_shift().is_commit());
        assert!(!KeyPress::new("a").is_commit());
    }

    #[test]
    fn test_event_wire_format() {
        let json = r#"{
            "type": "drag_ended",
            "source": { "columnId": "To Do", "index": 0 },
            "destination": null
        }"#;

        let event: AppEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            AppEvent::DragEnded(DragResult::aborted(DragLocation::new(ColumnId::ToDo, 0)))
        );

        let event: AppEvent =
            serde_json::from_str(r#"{ "type": "key_pressed", "key": "Enter" }"#).unwrap();
        assert_eq!(event, AppEvent::KeyPressed(KeyPress::new("Enter")));
    }
}
