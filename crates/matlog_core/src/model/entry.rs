//! Journal entry domain model.
//!
//! # Responsibility
//! - Define the single record persisted by the journal store.
//! - Fix the on-disk field names (`date`, `move`, `info`, `note`).
//!
//! # Invariants
//! - An entry is never mutated after it has been appended.
//! - `info` is resolved once at creation time and never re-resolved.
//! - No field is unique; duplicate entries are valid.

use serde::{Deserialize, Serialize};

/// One journal record.
///
/// Serialized as an object with exactly the fields `date`, `move`, `info`
/// and `note`, all strings. Unknown fields are ignored on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Locale-formatted creation date, e.g. `1/1/2024`.
    pub date: String,
    /// User-supplied move label, stored as typed. May be empty.
    #[serde(rename = "move")]
    pub move_name: String,
    /// Move description resolved at creation time, or the lookup sentinel.
    pub info: String,
    /// Free text, may be empty or multi-line.
    pub note: String,
}

impl Entry {
    pub fn new(
        date: impl Into<String>,
        move_name: impl Into<String>,
        info: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            move_name: move_name.into(),
            info: info.into(),
            note: note.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Entry;

    #[test]
    fn serializes_move_under_external_field_name() {
        let entry = Entry::new("1/1/2024", "Armbar", "info", "note");
        let value = serde_json::to_value(&entry).expect("entry should serialize");
        let object = value.as_object().expect("entry should be a JSON object");

        assert_eq!(object.len(), 4);
        assert_eq!(object["move"], "Armbar");
        assert!(object.get("move_name").is_none());
    }

    #[test]
    fn deserialize_ignores_unknown_fields_but_requires_known_ones() {
        let extra = r#"{"date":"d","move":"m","info":"i","note":"n","mood":"ok"}"#;
        let entry: Entry = serde_json::from_str(extra).expect("extra fields are ignored");
        assert_eq!(entry, Entry::new("d", "m", "i", "n"));

        let missing = r#"{"date":"d","move":"m","info":"i"}"#;
        assert!(serde_json::from_str::<Entry>(missing).is_err());
    }
}
