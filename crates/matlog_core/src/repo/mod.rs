//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value storage contract the journal depends on.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`IndexOutOfRange`,
//!   `StorageDecode`) in addition to storage transport errors.

pub mod journal_repo;
pub mod kv_repo;
