//! Journal use-case service.
//!
//! # Responsibility
//! - Compose entries: resolve move info and stamp the creation date.
//! - Provide the list/delete/clear calls the journal screen drives.
//!
//! # Invariants
//! - `info` is resolved exactly once, when the entry is recorded.
//! - `move` and `note` are stored as typed; only the lookup key is normalized.
//! - Service layer remains storage-agnostic.

use crate::lookup::move_info::{MoveDictionary, MoveInfoLookup};
use crate::model::entry::Entry;
use crate::repo::journal_repo::{JournalError, JournalStore};
use crate::repo::kv_repo::KvStore;
use chrono::{Local, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for journal use-cases.
#[derive(Debug)]
pub enum JournalServiceError {
    /// Store-layer failure.
    Journal(JournalError),
    /// Internal consistency mismatch between write and returned state.
    InconsistentState(&'static str),
}

impl JournalServiceError {
    /// Returns true when persisted data exists but cannot be read.
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, Self::Journal(JournalError::StorageDecode { .. }))
    }
}

impl Display for JournalServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Journal(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent journal state: {details}"),
        }
    }
}

impl Error for JournalServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Journal(err) => Some(err),
            Self::InconsistentState(_) => None,
        }
    }
}

impl From<JournalError> for JournalServiceError {
    fn from(value: JournalError) -> Self {
        Self::Journal(value)
    }
}

/// Formats a creation date as US short date without padding (`1/9/2024`).
pub fn format_entry_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Journal facade over a store and a move lookup.
pub struct JournalService<S: KvStore, L: MoveInfoLookup = &'static MoveDictionary> {
    store: JournalStore<S>,
    lookup: L,
}

impl<S: KvStore> JournalService<S> {
    /// Creates a service using the built-in move dictionary.
    pub fn new(store: JournalStore<S>) -> Self {
        Self::with_lookup(store, MoveDictionary::builtin())
    }
}

impl<S: KvStore, L: MoveInfoLookup> JournalService<S, L> {
    /// Creates a service using a caller-provided lookup.
    pub fn with_lookup(store: JournalStore<S>, lookup: L) -> Self {
        Self { store, lookup }
    }

    /// Resolves a move description without recording anything.
    pub fn move_info(&self, move_name: &str) -> String {
        self.lookup.resolve(move_name)
    }

    /// Records one entry dated today in local time.
    pub fn record_entry(
        &mut self,
        move_name: impl Into<String>,
        note: impl Into<String>,
    ) -> Result<Entry, JournalServiceError> {
        self.record_entry_on(Local::now().date_naive(), move_name, note)
    }

    /// Records one entry with an explicit creation date.
    pub fn record_entry_on(
        &mut self,
        date: NaiveDate,
        move_name: impl Into<String>,
        note: impl Into<String>,
    ) -> Result<Entry, JournalServiceError> {
        let move_name = move_name.into();
        let info = self.lookup.resolve(&move_name);
        let entry = Entry::new(format_entry_date(date), move_name, info, note);

        let entries = self.store.append(entry.clone())?;
        match entries.last() {
            Some(last) if *last == entry => Ok(entry),
            _ => Err(JournalServiceError::InconsistentState(
                "appended entry is not last in returned journal",
            )),
        }
    }

    /// Lists all entries in append order.
    pub fn entries(&self) -> Result<Vec<Entry>, JournalServiceError> {
        Ok(self.store.load()?)
    }

    /// Deletes the entry at a 0-based position and returns the rest.
    ///
    /// Negative positions fail with `IndexOutOfRange` without writing.
    pub fn delete_entry(&mut self, index: i64) -> Result<Vec<Entry>, JournalServiceError> {
        match usize::try_from(index) {
            Ok(position) => Ok(self.store.delete_at(position)?),
            Err(_) => {
                let len = self.store.load()?.len();
                Err(JournalError::IndexOutOfRange { index, len }.into())
            }
        }
    }

    /// Removes every entry.
    pub fn clear_journal(&mut self) -> Result<(), JournalServiceError> {
        self.store.clear()?;
        Ok(())
    }

    /// Releases the underlying store.
    pub fn into_store(self) -> JournalStore<S> {
        self.store
    }
}
