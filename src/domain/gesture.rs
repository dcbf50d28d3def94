use crate::domain::board::ColumnId;
use serde::{Deserialize, Serialize};

/// A position on the board as reported by the drag-and-drop source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragLocation {
    pub column_id: ColumnId,
    pub index: usize,
}

impl DragLocation {
    pub fn new(column_id: ColumnId, index: usize) -> Self {
        Self { column_id, index }
    }
}

/// A completed drag gesture.
///
/// `destination` is `None` when the card was dropped outside every column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragResult {
    pub source: DragLocation,
    pub destination: Option<DragLocation>,
}

impl DragResult {
    pub fn new(source: DragLocation, destination: DragLocation) -> Self {
        Self {
            source,
            destination: Some(destination),
        }
    }

    /// A gesture that ended without a drop target
    pub fn aborted(source: DragLocation) -> Self {
        Self {
            source,
            destination: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_gesture_payload() {
        let json = r#"{
            "source": { "columnId": "To Do", "index": 1 },
            "destination": { "columnId": "Done", "index": 0 }
        }"#;

        let drag: DragResult = serde_json::from_str(json).unwrap();
        assert_eq!(drag.source, DragLocation::new(ColumnId::ToDo, 1));
        assert_eq!(drag.destination, Some(DragLocation::new(ColumnId::Done, 0)));
    }

    #[test]
    fn test_deserialize_null_destination() {
        let json = r#"{ "source": { "columnId": "In Progress", "index": 0 }, "destination": null }"#;

        let drag: DragResult = serde_json::from_str(json).unwrap();
        assert!(drag.destination.is_none());
    }

    #[test]
    fn test_deserialize_unknown_column_fails() {
        let json = r#"{ "source": { "columnId": "Backlog", "index": 0 }, "destination": null }"#;
        assert!(serde_json::from_str::<DragResult>(json).is_err());
    }
}
