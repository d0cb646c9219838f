//! Static move dictionary.
//!
//! # Responsibility
//! - Ship the built-in move descriptions and parse them once per process.
//! - Normalize names the same way for keys and queries.
//!
//! # Invariants
//! - The dictionary is read-only after construction.
//! - `resolve` never fails.

use log::{debug, error};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Description returned when a move is not in the dictionary.
pub const NO_INFO_FOUND: &str = "No info found";

const BUILTIN_MOVE_INFO_JSON: &str = include_str!("move_info.json");

static BUILTIN: Lazy<MoveDictionary> = Lazy::new(|| {
    match MoveDictionary::from_json_str(BUILTIN_MOVE_INFO_JSON) {
        Ok(dictionary) => {
            debug!(
                "event=move_info_load module=lookup status=ok count={}",
                dictionary.len()
            );
            dictionary
        }
        Err(err) => {
            error!(
                "event=move_info_load module=lookup status=error error_code=builtin_parse_failed error={}",
                err
            );
            MoveDictionary::default()
        }
    }
});

/// Resolves move names to descriptions.
pub trait MoveInfoLookup {
    /// Returns the description for `name`, or [`NO_INFO_FOUND`].
    fn resolve(&self, name: &str) -> String;
}

impl<L: MoveInfoLookup + ?Sized> MoveInfoLookup for &L {
    fn resolve(&self, name: &str) -> String {
        (**self).resolve(name)
    }
}

/// Lowercase, whitespace-trimmed form used as dictionary key.
pub fn normalize_move_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Fixed mapping from normalized move name to description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveDictionary {
    entries: HashMap<String, String>,
}

impl MoveDictionary {
    /// Returns the dictionary bundled with this binary.
    pub fn builtin() -> &'static MoveDictionary {
        &BUILTIN
    }

    /// Builds a dictionary from `(name, description)` pairs.
    ///
    /// Names are normalized; on collision the last pair wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(name, info)| (normalize_move_name(name.as_ref()), info.into()))
            .collect();
        Self { entries }
    }

    /// Parses a JSON object of `name -> description` strings.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        let parsed: HashMap<String, String> = serde_json::from_str(raw)?;
        Ok(Self::from_pairs(parsed))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the description when `name` is known.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&normalize_move_name(name))
            .map(String::as_str)
    }
}

impl MoveInfoLookup for MoveDictionary {
    fn resolve(&self, name: &str) -> String {
        self.get(name).unwrap_or(NO_INFO_FOUND).to_string()
    }
}
