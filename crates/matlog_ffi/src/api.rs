//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the journal screens' use-cases to Dart via FRB.
//! - Turn core errors into envelopes the UI can render as static fallbacks.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Journal operations are serialized process-wide; at most one is in flight.
//! - A failed load never looks like an empty journal: `decode_failed` and
//!   `message` tell the shell data exists but is unreadable.

use log::warn;
use matlog_core::db::open_db;
use matlog_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Entry, JournalService, JournalServiceError, JournalStore, MoveDictionary, MoveInfoLookup,
    SqliteKvStore,
};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError};

const JOURNAL_DB_FILE_NAME: &str = "matlog_journal.sqlite3";
const JOURNAL_DB_PATH_ENV: &str = "MATLOG_DB_PATH";
static JOURNAL_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static JOURNAL_LOCK: Mutex<()> = Mutex::new(());

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One journal card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntryItem {
    pub date: String,
    pub move_name: String,
    pub info: String,
    pub note: String,
}

impl From<Entry> for JournalEntryItem {
    fn from(entry: Entry) -> Self {
        Self {
            date: entry.date,
            move_name: entry.move_name,
            info: entry.info,
            note: entry.note,
        }
    }
}

/// Journal list envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalListResponse {
    /// Whether the journal was read.
    pub ok: bool,
    /// Entries in append order; empty on failure.
    pub items: Vec<JournalEntryItem>,
    /// Persisted data exists but cannot be decoded. Storage is left as-is.
    pub decode_failed: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

/// Mutating-action envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalActionResponse {
    pub ok: bool,
    /// Entries left in the journal after a successful action.
    pub entry_count: u32,
    pub message: String,
}

impl JournalActionResponse {
    fn success(message: impl Into<String>, entry_count: usize) -> Self {
        Self {
            ok: true,
            entry_count: u32::try_from(entry_count).unwrap_or(u32::MAX),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            entry_count: 0,
            message: message.into(),
        }
    }
}

/// Loads the full journal for the journal screen.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_load() -> JournalListResponse {
    journal_load_in(&resolve_journal_db_path())
}

/// Records one entry dated today from the compose flow.
///
/// `move_name` and `note` are stored as typed; the move description is
/// resolved once here.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_add(move_name: String, note: String) -> JournalActionResponse {
    journal_add_in(&resolve_journal_db_path(), move_name, note)
}

/// Deletes the entry at a 0-based position in the last loaded list.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_delete_at(index: i64) -> JournalActionResponse {
    journal_delete_at_in(&resolve_journal_db_path(), index)
}

/// Removes every entry. Confirmation is the caller's job.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_clear() -> JournalActionResponse {
    journal_clear_in(&resolve_journal_db_path())
}

/// Resolves a move description without recording an entry.
///
/// # FFI contract
/// - Sync call, no storage access.
/// - Never fails; unknown moves return `No info found`.
#[flutter_rust_bridge::frb(sync)]
pub fn move_info(move_name: String) -> String {
    MoveDictionary::builtin().resolve(move_name.as_str())
}

fn journal_load_in(db_path: &Path) -> JournalListResponse {
    match with_journal_service(db_path, |service| service.entries()) {
        Ok(entries) => {
            let message = if entries.is_empty() {
                "No notes yet.".to_string()
            } else {
                format!("Loaded {} entries.", entries.len())
            };
            JournalListResponse {
                ok: true,
                items: entries.into_iter().map(JournalEntryItem::from).collect(),
                decode_failed: false,
                message,
            }
        }
        Err(failure) => JournalListResponse {
            ok: false,
            items: Vec::new(),
            decode_failed: failure.decode_failed,
            message: format!("journal_load failed: {}", failure.message),
        },
    }
}

fn journal_add_in(db_path: &Path, move_name: String, note: String) -> JournalActionResponse {
    let result = with_journal_service(db_path, |service| {
        service.record_entry(move_name, note)?;
        Ok(service.entries()?.len())
    });
    match result {
        Ok(count) => JournalActionResponse::success("Entry saved.", count),
        Err(failure) => {
            JournalActionResponse::failure(format!("journal_add failed: {}", failure.message))
        }
    }
}

fn journal_delete_at_in(db_path: &Path, index: i64) -> JournalActionResponse {
    match with_journal_service(db_path, |service| service.delete_entry(index)) {
        Ok(remaining) => JournalActionResponse::success("Entry deleted.", remaining.len()),
        Err(failure) => JournalActionResponse::failure(format!(
            "journal_delete_at failed: {}",
            failure.message
        )),
    }
}

fn journal_clear_in(db_path: &Path) -> JournalActionResponse {
    match with_journal_service(db_path, |service| service.clear_journal()) {
        Ok(()) => JournalActionResponse::success("Journal cleared!", 0),
        Err(failure) => {
            JournalActionResponse::failure(format!("journal_clear failed: {}", failure.message))
        }
    }
}

struct CallFailure {
    message: String,
    decode_failed: bool,
}

impl From<String> for CallFailure {
    fn from(message: String) -> Self {
        Self {
            message,
            decode_failed: false,
        }
    }
}

impl From<JournalServiceError> for CallFailure {
    fn from(err: JournalServiceError) -> Self {
        Self {
            decode_failed: err.is_decode_failure(),
            message: err.to_string(),
        }
    }
}

fn resolve_journal_db_path() -> PathBuf {
    JOURNAL_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(JOURNAL_DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(JOURNAL_DB_FILE_NAME)
        })
        .clone()
}

fn with_journal_service<T>(
    db_path: &Path,
    f: impl FnOnce(&mut JournalService<SqliteKvStore<'_>>) -> Result<T, JournalServiceError>,
) -> Result<T, CallFailure> {
    // A panicked holder cannot leave partial state behind: each write is one
    // atomic statement.
    let _guard = JOURNAL_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

    let conn = open_db(db_path).map_err(|err| format!("journal DB open failed: {err}"))?;
    let kv =
        SqliteKvStore::try_new(&conn).map_err(|err| format!("journal store init failed: {err}"))?;
    let mut service = JournalService::new(JournalStore::new(kv));
    f(&mut service).map_err(|err| {
        warn!(
            "event=ffi_call module=ffi status=error decode_failed={} error={}",
            err.is_decode_failure(),
            err
        );
        CallFailure::from(err)
    })
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, journal_add_in, journal_clear_in, journal_delete_at_in,
        journal_load_in, move_info, ping,
    };
    use matlog_core::db::open_db;
    use matlog_core::{KvStore, SqliteKvStore, JOURNAL_KEY, NO_INFO_FOUND};
    use std::path::PathBuf;

    fn temp_db() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("journal.sqlite3");
        (dir, path)
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn move_info_is_total() {
        assert_eq!(move_info("ARMBAR ".to_string()), move_info("armbar".to_string()));
        assert_eq!(move_info("nonexistent-move".to_string()), NO_INFO_FOUND);
    }

    #[test]
    fn journal_flow_add_delete_clear() {
        let (_dir, path) = temp_db();

        let empty = journal_load_in(&path);
        assert!(empty.ok, "{}", empty.message);
        assert!(empty.items.is_empty());

        let added = journal_add_in(&path, "Armbar".to_string(), "felt smooth".to_string());
        assert!(added.ok, "{}", added.message);
        assert_eq!(added.entry_count, 1);
        let added = journal_add_in(&path, "Triangle".to_string(), String::new());
        assert_eq!(added.entry_count, 2);

        let loaded = journal_load_in(&path);
        assert_eq!(loaded.items.len(), 2);
        assert_eq!(loaded.items[0].move_name, "Armbar");
        assert_eq!(loaded.items[0].info, move_info("armbar".to_string()));
        assert_eq!(loaded.items[1].move_name, "Triangle");

        let deleted = journal_delete_at_in(&path, 0);
        assert!(deleted.ok, "{}", deleted.message);
        assert_eq!(deleted.entry_count, 1);
        assert_eq!(journal_load_in(&path).items[0].move_name, "Triangle");

        let cleared = journal_clear_in(&path);
        assert!(cleared.ok, "{}", cleared.message);
        assert!(journal_load_in(&path).items.is_empty());
    }

    #[test]
    fn journal_delete_rejects_out_of_range_positions() {
        let (_dir, path) = temp_db();
        journal_add_in(&path, "Kimura".to_string(), String::new());

        for index in [-1, 1, 99] {
            let response = journal_delete_at_in(&path, index);
            assert!(!response.ok);
            assert!(response.message.contains("out of range"), "{}", response.message);
        }
        assert_eq!(journal_load_in(&path).items.len(), 1);
    }

    #[test]
    fn journal_load_flags_undecodable_data_and_keeps_it() {
        let (_dir, path) = temp_db();
        {
            let conn = open_db(&path).expect("open db");
            let mut kv = SqliteKvStore::try_new(&conn).expect("kv store");
            kv.set_item(JOURNAL_KEY, "{not a list").expect("seed");
        }

        let response = journal_load_in(&path);
        assert!(!response.ok);
        assert!(response.decode_failed);
        assert!(response.items.is_empty());

        let conn = open_db(&path).expect("open db");
        let kv = SqliteKvStore::try_new(&conn).expect("kv store");
        assert_eq!(
            kv.get_item(JOURNAL_KEY).expect("read").as_deref(),
            Some("{not a list")
        );
    }
}
