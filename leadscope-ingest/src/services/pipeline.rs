//! End-to-end ingest pipeline
//!
//! dedup → batch categorize → expand → bulk insert. Categorization
//! failures are absorbed upstream (defaults + per-record flag); the only
//! errors this returns are persistence failures, for which there is no
//! meaningful default.

use crate::db;
use crate::models::TranscriptRecord;
use crate::services::batch::{BatchCategorizer, BatchOutcome, ProgressFn};
use crate::services::dedup::partition_new_records;
use crate::services::expand::expand_results;
use leadscope_common::Result;
use serde::Serialize;
use sqlx::SqlitePool;

/// Summary of one ingest run
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IngestSummary {
    pub rows_received: usize,
    pub rows_added: usize,
    pub duplicates_skipped: usize,
    pub failed_categorizations: usize,
    pub warnings: Vec<String>,
}

/// Ingest pipeline service
pub struct IngestPipeline {
    db: SqlitePool,
    batch: BatchCategorizer,
}

impl IngestPipeline {
    pub fn new(db: SqlitePool, batch: BatchCategorizer) -> Self {
        Self { db, batch }
    }

    /// Append new records: dedup against persisted keys, categorize, insert
    ///
    /// When every candidate is a duplicate this is a no-op summary, not an
    /// error. The db write happens only after all categorization for the
    /// run completes (single bulk insert).
    pub async fn append(
        &self,
        records: Vec<TranscriptRecord>,
        progress: Option<&ProgressFn>,
    ) -> Result<IngestSummary> {
        let rows_received = records.len();

        let existing_keys = db::clients::fetch_existing_keys(&self.db).await?;
        let (new_records, duplicates_skipped) = partition_new_records(&existing_keys, records);

        if duplicates_skipped > 0 {
            tracing::info!(duplicates_skipped, "Skipping already-persisted records");
        }

        if new_records.is_empty() {
            return Ok(IngestSummary {
                rows_received,
                rows_added: 0,
                duplicates_skipped,
                failed_categorizations: 0,
                warnings: Vec::new(),
            });
        }

        let outcome = self.batch.categorize_all(&new_records, progress).await;
        self.finish(rows_received, duplicates_skipped, new_records, outcome, false)
            .await
    }

    /// Full reprocess: categorize everything and replace all persisted rows
    pub async fn replace(
        &self,
        records: Vec<TranscriptRecord>,
        progress: Option<&ProgressFn>,
    ) -> Result<IngestSummary> {
        let rows_received = records.len();
        let outcome = self.batch.categorize_all(&records, progress).await;
        self.finish(rows_received, 0, records, outcome, true).await
    }

    async fn finish(
        &self,
        rows_received: usize,
        duplicates_skipped: usize,
        records: Vec<TranscriptRecord>,
        outcome: BatchOutcome,
        replace_existing: bool,
    ) -> Result<IngestSummary> {
        let BatchOutcome {
            results,
            failed_count,
            warnings,
        } = outcome;

        let enriched = expand_results(records, results);
        let rows_added = enriched.len();

        if replace_existing {
            db::clients::replace_all(&self.db, &enriched).await?;
        } else {
            db::clients::insert_records(&self.db, &enriched).await?;
        }

        tracing::info!(
            rows_added,
            duplicates_skipped,
            failed_categorizations = failed_count,
            "Ingest run persisted"
        );

        Ok(IngestSummary {
            rows_received,
            rows_added,
            duplicates_skipped,
            failed_categorizations: failed_count,
            warnings,
        })
    }
}
