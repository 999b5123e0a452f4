//! Duplicate filtering against already-persisted records
//!
//! Pure partition: no database access here. The caller fetches the existing
//! identity-key set once per append (`db::clients::fetch_existing_keys`)
//! and passes it in.

use crate::models::{IdentityKey, TranscriptRecord};
use std::collections::HashSet;

/// Split candidates into new records and a duplicate count
///
/// A candidate is a duplicate iff its exact-string identity key matches an
/// existing key. An empty existing-key set short-circuits: every candidate
/// passes through untouched. All-duplicates is a valid no-op outcome, not
/// an error.
pub fn partition_new_records(
    existing: &HashSet<IdentityKey>,
    candidates: Vec<TranscriptRecord>,
) -> (Vec<TranscriptRecord>, usize) {
    if existing.is_empty() {
        return (candidates, 0);
    }

    let total = candidates.len();
    let new_records: Vec<TranscriptRecord> = candidates
        .into_iter()
        .filter(|record| !existing.contains(&record.identity_key()))
        .collect();
    let duplicate_count = total - new_records.len();

    (new_records, duplicate_count)
}
