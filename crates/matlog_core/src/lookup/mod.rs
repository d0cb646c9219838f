//! Move description lookup.
//!
//! # Responsibility
//! - Resolve a user-typed move name to a fixed description.
//!
//! # Invariants
//! - Lookup is total: unknown names resolve to [`NO_INFO_FOUND`].
//! - Matching ignores case and surrounding whitespace.

pub mod move_info;
