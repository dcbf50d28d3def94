use crate::error::{JotboardError, Result};
use chrono::{
    format::{Item, StrftimeItems},
    DateTime, TimeZone,
};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use uuid::Uuid;

/// A committed line of the note log.
///
/// This is exactly the record stored in a snapshot: `{ "text", "time" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEntry {
    pub text: String,
    pub time: String,
}

impl NoteEntry {
    pub fn new(text: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            time: time.into(),
        }
    }
}

/// Session-local identifier of a note, assigned when the note enters the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteId(Uuid);

impl NoteId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A note as held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub entry: NoteEntry,
}

/// Chronological log of notes.
///
/// Insertion order is display order. Mutations address notes by position;
/// ids are available for callers that need an address stable across deletes.
#[derive(Debug, Clone, Default)]
pub struct NoteLog {
    notes: Vec<Note>,
}

impl NoteLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = NoteEntry>) -> Self {
        Self {
            notes: entries
                .into_iter()
                .map(|entry| Note {
                    id: NoteId::new(),
                    entry,
                })
                .collect(),
        }
    }

    /// Parses a snapshot written by [`NoteLog::to_snapshot`]
    pub fn from_snapshot(snapshot: &str) -> Result<Self> {
        let entries: Vec<NoteEntry> = serde_json::from_str(snapshot)?;
        Ok(Self::from_entries(entries))
    }

    pub fn to_snapshot(&self) -> Result<String> {
        let entries: Vec<&NoteEntry> = self.notes.iter().map(|note| &note.entry).collect();
        Ok(serde_json::to_string(&entries)?)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn entries(&self) -> impl Iterator<Item = &NoteEntry> {
        self.notes.iter().map(|note| &note.entry)
    }

    pub fn get(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn position_of(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    /// Appends an entry at the end of the log
    pub fn append(&mut self, entry: NoteEntry) -> NoteId {
        let id = NoteId::new();
        self.notes.push(Note { id, entry });
        id
    }

    /// Replaces the text of an entry; its time is kept
    pub fn edit(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        let len = self.notes.len();
        let note = self
            .notes
            .get_mut(index)
            .ok_or_else(|| JotboardError::out_of_range("note log", index, len))?;
        note.entry.text = text.into();
        Ok(())
    }

    /// Removes an entry; later entries shift down by one
    pub fn delete(&mut self, index: usize) -> Result<NoteEntry> {
        if index >= self.notes.len() {
            return Err(JotboardError::out_of_range("note log", index, self.notes.len()));
        }
        Ok(self.notes.remove(index).entry)
    }
}

/// strftime pattern used to stamp notes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeFormat(String);

impl TimeFormat {
    /// Locale-style wall clock time, e.g. `3:04:05 PM`
    pub const DEFAULT: &'static str = "%-I:%M:%S %p";

    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if pattern.trim().is_empty() {
            return Err(JotboardError::ConfigError(
                "time format must not be empty".to_string(),
            ));
        }
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(JotboardError::ConfigError(format!(
                "invalid time format: {pattern:?}"
            )));
        }
        Ok(Self(pattern))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn format<Tz>(&self, at: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let mut out = String::new();
        if write!(out, "{}", at.format(&self.0)).is_err() {
            // Patterns are validated on construction; only fields the value
            // cannot provide end up here.
            out.clear();
            let _ = write!(out, "{}", at.format(Self::DEFAULT));
        }
        out
    }
}

impl Default for TimeFormat {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl TryFrom<String> for TimeFormat {
    type Error = JotboardError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<TimeFormat> for String {
    fn from(value: TimeFormat) -> Self {
        value.0
    }
}

/// The note line being typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft(String);

impl Draft {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Replaces the draft verbatim
    pub fn set(&mut self, text: impl Into<String>) {
        self.0 = text.into();
    }

    /// True when the draft holds nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Takes the untrimmed text out, leaving the draft empty
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.0)
    }

    /// Time shown next to a non-empty draft line
    pub fn time_hint<Tz>(&self, format: &TimeFormat, now: &DateTime<Tz>) -> Option<String>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        if self.0.is_empty() {
            None
        } else {
            Some(format.format(now))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn log_of(texts: &[&str]) -> NoteLog {
        NoteLog::from_entries(texts.iter().map(|t| NoteEntry::new(*t, "9:00:00 AM")))
    }

    fn texts(log: &NoteLog) -> Vec<&str> {
        log.entries().map(|e| e.text.as_str()).collect()
    }

    #[test]
    fn test_delete_shifts_positions() {
        let mut log = log_of(&["A", "B", "C"]);

        let removed = log.delete(1).unwrap();
        assert_eq!(removed.text, "B");
        assert_eq!(texts(&log), ["A", "C"]);

        log.edit(1, "X").unwrap();
        assert_eq!(texts(&log), ["A", "X"]);
    }

    #[test]
    fn test_edit_keeps_time() {
        let mut log = NoteLog::new();
        log.append(NoteEntry::new("first", "1:02:03 PM"));

        log.edit(0, "changed").unwrap();

        assert_eq!(log.get(0).unwrap().entry, NoteEntry::new("changed", "1:02:03 PM"));
    }

    #[test]
    fn test_out_of_range_leaves_log_intact() {
        let mut log = log_of(&["A", "B"]);

        assert!(log.edit(2, "X").is_err());
        assert!(log.delete(7).is_err());
        assert_eq!(texts(&log), ["A", "B"]);
    }

    #[test]
    fn test_ids_survive_deletes() {
        let mut log = NoteLog::new();
        let _a = log.append(NoteEntry::new("A", "t"));
        let b = log.append(NoteEntry::new("B", "t"));
        let c = log.append(NoteEntry::new("C", "t"));

        assert_eq!(log.position_of(c), Some(2));
        log.delete(1).unwrap();
        assert_eq!(log.position_of(c), Some(1));
        assert_eq!(log.position_of(b), None);
    }

    #[test]
    fn test_snapshot_format() {
        let log = log_of(&["Buy milk"]);
        let snapshot = log.to_snapshot().unwrap();

        assert_eq!(snapshot, r#"[{"text":"Buy milk","time":"9:00:00 AM"}]"#);
    }

    #[test]
    fn test_snapshot_restores_entries() {
        let log = log_of(&["  padded  ", "", "unicode ✓", "line\nbreak"]);

        let restored = NoteLog::from_snapshot(&log.to_snapshot().unwrap()).unwrap();

        assert!(restored.entries().eq(log.entries()));
    }

    #[test]
    fn test_malformed_snapshot_is_error() {
        assert!(NoteLog::from_snapshot("not json").is_err());
        assert!(NoteLog::from_snapshot(r#"[{"text":"missing time"}]"#).is_err());
        assert!(NoteLog::from_snapshot(r#"{"text":"a","time":"b"}"#).is_err());
    }

    #[test]
    fn test_time_format_validation() {
        assert!(TimeFormat::new("%H:%M").is_ok());
        assert!(TimeFormat::new("").is_err());
        assert!(TimeFormat::new("%Q%").is_err());
    }

    #[test]
    fn test_default_time_format() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 15, 4, 5).unwrap();
        assert_eq!(TimeFormat::default().format(&at), "3:04:05 PM");
    }

    #[test]
    fn test_draft_blank_detection() {
        let mut draft = Draft::default();
        assert!(draft.is_blank());

        draft.set("  \t ");
        assert!(draft.is_blank());
        assert_eq!(draft.as_str(), "  \t ");

        draft.set(" note ");
        assert!(!draft.is_blank());
        assert_eq!(draft.take(), " note ");
        assert_eq!(draft.as_str(), "");
    }

    #[test]
    fn test_draft_time_hint() {
        let format = TimeFormat::default();
        let now = Utc::now();
        let mut draft = Draft::default();

        assert_eq!(draft.time_hint(&format, &now), None);

        draft.set(" ");
        assert_eq!(draft.time_hint(&format, &now), Some(format.format(&now)));
    }
}
