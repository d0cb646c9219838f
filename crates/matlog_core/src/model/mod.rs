//! Domain model for the training journal.
//!
//! # Responsibility
//! - Define the data structures persisted by the journal store.
//!
//! # Invariants
//! - Entries carry no identity; position in the journal is the only address.
//! - Deletion is a hard delete; there are no tombstones.

pub mod entry;
