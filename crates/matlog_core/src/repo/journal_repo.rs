//! Journal store over a single key-value entry.
//!
//! # Responsibility
//! - Own the durable, ordered list of journal entries.
//! - Provide load/append/delete-by-position/clear with whole-list
//!   read-modify-write semantics.
//!
//! # Invariants
//! - Order is append order; nothing is ever sorted.
//! - Absent key, empty value and empty array all load as an empty journal.
//! - A value that fails to decode is reported and left untouched in storage.
//! - Each mutating call reads the journal key once and writes it at most once.
//! - No in-memory cache: every call re-reads storage.

use crate::model::entry::Entry;
use crate::repo::kv_repo::{KvError, KvStore};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Storage key holding the serialized journal.
pub const JOURNAL_KEY: &str = "bjjNotes";

pub type JournalResult<T> = Result<T, JournalError>;

/// Journal store error.
#[derive(Debug)]
pub enum JournalError {
    /// Underlying read or write failed.
    StorageIo(KvError),
    /// Persisted value exists but is not a valid entry list.
    StorageDecode { message: String },
    /// Delete target outside `[0, len)`.
    IndexOutOfRange { index: i64, len: usize },
}

impl Display for JournalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageIo(err) => write!(f, "journal storage failed: {err}"),
            Self::StorageDecode { message } => {
                write!(f, "journal data could not be decoded: {message}")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "entry index {index} out of range for {len} entries")
            }
        }
    }
}

impl Error for JournalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageIo(err) => Some(err),
            Self::StorageDecode { .. } | Self::IndexOutOfRange { .. } => None,
        }
    }
}

impl From<KvError> for JournalError {
    fn from(value: KvError) -> Self {
        Self::StorageIo(value)
    }
}

/// Durable ordered collection of [`Entry`] values.
///
/// Mutating operations take `&mut self`, so a single owner can never have
/// two operations in flight.
pub struct JournalStore<S: KvStore> {
    kv: S,
    key: String,
}

impl<S: KvStore> JournalStore<S> {
    /// Creates a store persisting under [`JOURNAL_KEY`].
    pub fn new(kv: S) -> Self {
        Self::with_key(kv, JOURNAL_KEY)
    }

    /// Creates a store persisting under a caller-chosen key.
    pub fn with_key(kv: S, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Releases the underlying key-value store.
    pub fn into_inner(self) -> S {
        self.kv
    }

    /// Reads the full journal.
    ///
    /// # Errors
    /// - `StorageIo` when the read fails.
    /// - `StorageDecode` when a value is present but malformed. The value is
    ///   not modified.
    pub fn load(&self) -> JournalResult<Vec<Entry>> {
        let started_at = Instant::now();
        let entries = self.read_entries("journal_load")?;
        info!(
            "event=journal_load module=journal status=ok count={} duration_ms={}",
            entries.len(),
            started_at.elapsed().as_millis()
        );
        Ok(entries)
    }

    /// Appends one entry to the end and returns the updated journal.
    pub fn append(&mut self, entry: Entry) -> JournalResult<Vec<Entry>> {
        let started_at = Instant::now();
        let mut entries = self.read_entries("journal_append")?;
        entries.push(entry);
        self.write_entries("journal_append", &entries)?;
        info!(
            "event=journal_append module=journal status=ok count={} duration_ms={}",
            entries.len(),
            started_at.elapsed().as_millis()
        );
        Ok(entries)
    }

    /// Removes the entry at `index` and returns the remaining journal.
    ///
    /// Removes the storage key when the last entry is deleted.
    ///
    /// # Errors
    /// - `IndexOutOfRange` when `index >= len`; storage is not written.
    pub fn delete_at(&mut self, index: usize) -> JournalResult<Vec<Entry>> {
        let started_at = Instant::now();
        let mut entries = self.read_entries("journal_delete")?;
        if index >= entries.len() {
            let err = JournalError::IndexOutOfRange {
                index: i64::try_from(index).unwrap_or(i64::MAX),
                len: entries.len(),
            };
            warn!(
                "event=journal_delete module=journal status=error error_code=index_out_of_range index={} count={}",
                index,
                entries.len()
            );
            return Err(err);
        }

        entries.remove(index);
        self.write_entries("journal_delete", &entries)?;
        info!(
            "event=journal_delete module=journal status=ok index={} count={} duration_ms={}",
            index,
            entries.len(),
            started_at.elapsed().as_millis()
        );
        Ok(entries)
    }

    /// Deletes the persisted journal. Calling it on an empty journal is a no-op.
    pub fn clear(&mut self) -> JournalResult<Vec<Entry>> {
        if let Err(err) = self.kv.remove_item(&self.key) {
            error!(
                "event=journal_clear module=journal status=error error_code=storage_write_failed error={}",
                err
            );
            return Err(err.into());
        }
        info!("event=journal_clear module=journal status=ok");
        Ok(Vec::new())
    }

    fn read_entries(&self, event: &'static str) -> JournalResult<Vec<Entry>> {
        let raw = match self.kv.get_item(&self.key) {
            Ok(raw) => raw,
            Err(err) => {
                error!(
                    "event={} module=journal status=error error_code=storage_read_failed error={}",
                    event, err
                );
                return Err(err.into());
            }
        };

        let Some(raw) = raw else {
            return Ok(Vec::new());
        };
        if raw.is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str::<Vec<Entry>>(&raw).map_err(|err| {
            // Entry text is user data; log shape metadata only.
            error!(
                "event={} module=journal status=error error_code=decode_failed raw_len={} line={} column={}",
                event,
                raw.len(),
                err.line(),
                err.column()
            );
            JournalError::StorageDecode {
                message: err.to_string(),
            }
        })
    }

    fn write_entries(&mut self, event: &'static str, entries: &[Entry]) -> JournalResult<()> {
        let result = if entries.is_empty() {
            self.kv.remove_item(&self.key)
        } else {
            let encoded = serde_json::to_string(entries).map_err(|err| {
                JournalError::StorageIo(KvError::Unavailable(format!(
                    "failed to encode journal: {err}"
                )))
            })?;
            self.kv.set_item(&self.key, &encoded)
        };

        result.map_err(|err| {
            error!(
                "event={} module=journal status=error error_code=storage_write_failed error={}",
                event, err
            );
            JournalError::StorageIo(err)
        })
    }
}
