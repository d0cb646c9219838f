//! Property-based tests for journal ordering.
//!
//! - Appends round-trip through storage in order.
//! - Deleting any valid index removes exactly that entry.

use matlog_core::db::open_db_in_memory;
use matlog_core::{Entry, JournalStore, MemoryKvStore, SqliteKvStore};
use proptest::prelude::*;

fn entry_strategy() -> impl Strategy<Value = Entry> {
    (
        "[0-9]{1,2}/[0-9]{1,2}/20[0-9]{2}",
        any::<String>(),
        ".{0,40}",
        any::<String>(),
    )
        .prop_map(|(date, move_name, info, note)| Entry::new(date, move_name, info, note))
}

proptest! {
    /// Property: load after N appends equals the appended list.
    #[test]
    fn prop_append_round_trip(entries in prop::collection::vec(entry_strategy(), 0..12)) {
        let conn = open_db_in_memory().unwrap();
        let mut store = JournalStore::new(SqliteKvStore::try_new(&conn).unwrap());

        for entry in &entries {
            store.append(entry.clone()).unwrap();
        }

        prop_assert_eq!(store.load().unwrap(), entries);
    }

    /// Property: delete_at(i) removes position i and keeps relative order.
    #[test]
    fn prop_delete_removes_only_target(
        entries in prop::collection::vec(entry_strategy(), 1..12),
        seed in any::<prop::sample::Index>(),
    ) {
        let index = seed.index(entries.len());
        let mut store = JournalStore::new(MemoryKvStore::new());
        for entry in &entries {
            store.append(entry.clone()).unwrap();
        }

        store.delete_at(index).unwrap();

        let mut expected = entries.clone();
        expected.remove(index);
        prop_assert_eq!(store.load().unwrap(), expected);
    }

    /// Property: out-of-range delete leaves the journal unchanged.
    #[test]
    fn prop_out_of_range_delete_is_rejected(
        entries in prop::collection::vec(entry_strategy(), 0..6),
        overshoot in 0usize..5,
    ) {
        let mut store = JournalStore::new(MemoryKvStore::new());
        for entry in &entries {
            store.append(entry.clone()).unwrap();
        }

        prop_assert!(store.delete_at(entries.len() + overshoot).is_err());
        prop_assert_eq!(store.load().unwrap(), entries);
    }
}
