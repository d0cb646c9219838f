//! Core domain logic for MatLog.
//! This crate is the single source of truth for journal invariants.

pub mod db;
pub mod logging;
pub mod lookup;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{
    default_log_level, init_logging, level_from_env, logging_status, LogLevel, LoggingError,
};
pub use lookup::move_info::{normalize_move_name, MoveDictionary, MoveInfoLookup, NO_INFO_FOUND};
pub use model::entry::Entry;
pub use repo::journal_repo::{JournalError, JournalResult, JournalStore, JOURNAL_KEY};
pub use repo::kv_repo::{KvError, KvResult, KvStore, MemoryKvStore, SqliteKvStore};
pub use service::journal_service::{format_entry_date, JournalService, JournalServiceError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
