//! Merging categorization results back into transcript records
//!
//! Alignment is positional: result *i* belongs to record *i*. The batch
//! orchestrator guarantees order preservation, so no keys are needed here.

use crate::models::{CategorizationResult, Concern, EnrichedRecord, TranscriptRecord};

/// Derive the search-friendly concern text for a record
///
/// Concatenates each concern's type and verbatim excerpt, space-separated.
/// This is a cache of `concerns`, recomputed whenever they change; deriving
/// twice always yields identical text.
pub fn build_concerns_text(concerns: &[Concern]) -> String {
    concerns
        .iter()
        .map(|c| format!("{} {}", c.concern_type, c.quote_excerpt))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Merge each result into its positionally-corresponding record
///
/// # Panics
/// Panics if the two lists have different lengths; the orchestrator
/// contract (one result per record, input order) makes that a programming
/// error rather than a runtime condition.
pub fn expand_results(
    records: Vec<TranscriptRecord>,
    results: Vec<CategorizationResult>,
) -> Vec<EnrichedRecord> {
    assert_eq!(
        records.len(),
        results.len(),
        "one categorization result per record"
    );

    records
        .into_iter()
        .zip(results)
        .map(|(record, categorization)| {
            let concerns_text = build_concerns_text(&categorization.concerns);
            EnrichedRecord {
                record,
                categorization,
                concerns_text,
            }
        })
        .collect()
}
