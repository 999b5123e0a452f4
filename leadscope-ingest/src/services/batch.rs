//! Batch orchestration of categorization calls
//!
//! Drives the remote categorizer over fixed-size groups with retry,
//! exponential backoff, quota short-circuiting, and inter-group pacing.
//! Absorbs every failure into default fallbacks: the orchestrator never
//! raises to its caller, and always yields exactly one result per input
//! record in input order.

use crate::models::{CategorizationResult, TranscriptRecord};
use crate::services::categorizer::Categorizer;
use std::sync::Arc;
use std::time::Duration;

/// Tuning knobs for the batch orchestrator
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Records per remote call
    pub group_size: usize,
    /// Attempts per group before falling back to defaults
    pub retry_attempts: u32,
    /// Pause between groups (rate-limit courtesy)
    pub pacing: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            group_size: 5,
            retry_attempts: 3,
            pacing: Duration::from_secs(2),
        }
    }
}

/// Progress callback: `(records processed so far, total records)`
pub type ProgressFn = dyn Fn(usize, usize) + Send + Sync;

/// Outcome of a full categorization run
#[derive(Debug)]
pub struct BatchOutcome {
    /// One result per input record, in input order
    pub results: Vec<CategorizationResult>,
    /// Records that ended up with the default fallback
    pub failed_count: usize,
    /// User-visible warnings accumulated across groups
    pub warnings: Vec<String>,
}

/// Batch categorization orchestrator
pub struct BatchCategorizer {
    categorizer: Arc<dyn Categorizer>,
    config: BatchConfig,
}

impl BatchCategorizer {
    pub fn new(categorizer: Arc<dyn Categorizer>, config: BatchConfig) -> Self {
        Self { categorizer, config }
    }

    /// Categorize every record, in groups, with graceful degradation
    ///
    /// Calls the progress callback after each group with the running record
    /// count, and pauses between groups (never after the last).
    pub async fn categorize_all(
        &self,
        records: &[TranscriptRecord],
        progress: Option<&ProgressFn>,
    ) -> BatchOutcome {
        let total = records.len();
        let mut results = Vec::with_capacity(total);
        let mut warnings = Vec::new();
        let mut failed_count = 0;

        for (group_index, group) in records.chunks(self.config.group_size).enumerate() {
            let group_start = group_index * self.config.group_size;
            let group_results = self.process_group(group, group_start, &mut warnings).await;

            failed_count += group_results
                .iter()
                .filter(|r| !r.categorization_succeeded)
                .count();
            results.extend(group_results);

            let processed = results.len();
            if let Some(callback) = progress {
                callback(processed, total);
            }

            if processed < total {
                tokio::time::sleep(self.config.pacing).await;
            }
        }

        BatchOutcome {
            results,
            failed_count,
            warnings,
        }
    }

    /// Categorize one group with retry and backoff
    ///
    /// Quota errors abort the group's retries immediately (further attempts
    /// are certain to fail identically); any other exhaustion also resolves
    /// to default fallbacks. Always returns one result per group record.
    async fn process_group(
        &self,
        group: &[TranscriptRecord],
        group_start: usize,
        warnings: &mut Vec<String>,
    ) -> Vec<CategorizationResult> {
        let group_size = group.len();
        let transcripts: Vec<String> = group.iter().map(|r| r.transcript.clone()).collect();
        let client_names: Vec<String> = group.iter().map(|r| r.client_name.clone()).collect();
        let group_label = format!("{}-{}", group_start + 1, group_start + group_size);

        for attempt in 0..self.config.retry_attempts {
            if attempt > 0 {
                // Exponential backoff: 2, 4, 8... seconds
                let backoff = Duration::from_secs(2u64.pow(attempt));
                tracing::debug!(group = %group_label, attempt, backoff_secs = backoff.as_secs(), "Retrying group after backoff");
                tokio::time::sleep(backoff).await;
            }

            match self
                .categorizer
                .categorize_batch(&transcripts, &client_names, group_size)
                .await
            {
                Ok(mut group_results) => {
                    for result in &mut group_results {
                        result.categorization_succeeded = true;
                    }
                    tracing::info!(group = %group_label, attempt, "Group categorized");
                    return group_results;
                }
                Err(e) if e.is_rate_limited() => {
                    let warning =
                        format!("API quota reached on records {}: {}", group_label, e);
                    tracing::warn!(group = %group_label, error = %e, "Quota exhausted, aborting retries for group");
                    warnings.push(warning);
                    return default_group(group_size);
                }
                Err(e) => {
                    tracing::warn!(group = %group_label, attempt, error = %e, "Group categorization attempt failed");
                    if attempt == self.config.retry_attempts - 1 {
                        warnings.push(format!("Categorization failed for records {}: {}", group_label, e));
                    }
                }
            }
        }

        default_group(group_size)
    }
}

fn default_group(group_size: usize) -> Vec<CategorizationResult> {
    (0..group_size)
        .map(|_| CategorizationResult::default_fallback())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SectorPrimary, VolumeLevel};
    use crate::services::categorizer::CategorizerError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted categorizer: one script entry per remote call
    enum Script {
        Ok,
        Err(fn() -> CategorizerError),
    }

    struct ScriptedCategorizer {
        script: Mutex<Vec<Script>>,
        calls: AtomicUsize,
        call_sizes: Mutex<Vec<usize>>,
    }

    impl ScriptedCategorizer {
        fn new(script: Vec<Script>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script),
                calls: AtomicUsize::new(0),
                call_sizes: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Categorizer for ScriptedCategorizer {
        async fn categorize_one(
            &self,
            _transcript: &str,
            _client_name: &str,
        ) -> Result<CategorizationResult, CategorizerError> {
            unimplemented!("not used by BatchCategorizer")
        }

        async fn categorize_batch(
            &self,
            transcripts: &[String],
            _client_names: &[String],
            expected_count: usize,
        ) -> Result<Vec<CategorizationResult>, CategorizerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.call_sizes.lock().unwrap().push(expected_count);

            let mut script = self.script.lock().unwrap();
            let step = if script.is_empty() { Script::Ok } else { script.remove(0) };

            match step {
                Script::Ok => Ok(transcripts
                    .iter()
                    .map(|t| {
                        let mut result = CategorizationResult::default_fallback();
                        result.sector_primary = SectorPrimary::Technology;
                        result.volume_level = VolumeLevel::Medium;
                        result.source_detail = t.clone(); // keeps order observable
                        result
                    })
                    .collect()),
                Script::Err(make) => Err(make()),
            }
        }
    }

    fn records(n: usize) -> Vec<TranscriptRecord> {
        (0..n)
            .map(|i| TranscriptRecord {
                client_name: format!("Client {i}"),
                email: format!("c{i}@x.com"),
                phone: String::new(),
                meeting_date: "2024-01-01".parse().unwrap(),
                assigned_seller: "Laura".to_string(),
                closed: false,
                transcript: format!("transcript {i}"),
            })
            .collect()
    }

    fn quota_error() -> CategorizerError {
        CategorizerError::Api(429, "quota exceeded".to_string())
    }

    fn network_error() -> CategorizerError {
        CategorizerError::Network("connection reset".to_string())
    }

    #[tokio::test(start_paused = true)]
    async fn groups_of_five_preserve_order() {
        let categorizer = ScriptedCategorizer::new(vec![]);
        let batch = BatchCategorizer::new(categorizer.clone(), BatchConfig::default());

        let outcome = batch.categorize_all(&records(12), None).await;

        assert_eq!(categorizer.calls(), 3);
        assert_eq!(*categorizer.call_sizes.lock().unwrap(), vec![5, 5, 2]);
        assert_eq!(outcome.results.len(), 12);
        assert_eq!(outcome.failed_count, 0);
        for (i, result) in outcome.results.iter().enumerate() {
            assert_eq!(result.source_detail, format!("transcript {i}"));
            assert!(result.categorization_succeeded);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn quota_error_aborts_group_retries() {
        // group 1 ok, group 2 hits quota (single attempt), group 3 ok
        let categorizer = ScriptedCategorizer::new(vec![
            Script::Ok,
            Script::Err(quota_error),
            Script::Ok,
        ]);
        let batch = BatchCategorizer::new(categorizer.clone(), BatchConfig::default());

        let outcome = batch.categorize_all(&records(12), None).await;

        // no retries for the quota group: exactly one call per group
        assert_eq!(categorizer.calls(), 3);
        assert_eq!(outcome.results.len(), 12);
        assert_eq!(outcome.failed_count, 5);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("6-10"));

        assert!(outcome.results[..5].iter().all(|r| r.categorization_succeeded));
        assert!(outcome.results[5..10].iter().all(|r| !r.categorization_succeeded));
        assert!(outcome.results[10..].iter().all(|r| r.categorization_succeeded));
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failure_is_retried_then_succeeds() {
        let categorizer = ScriptedCategorizer::new(vec![
            Script::Err(|| CategorizerError::CardinalityMismatch {
                expected: 5,
                actual: 4,
            }),
            Script::Ok,
        ]);
        let batch = BatchCategorizer::new(categorizer.clone(), BatchConfig::default());

        let outcome = batch.categorize_all(&records(5), None).await;

        assert_eq!(categorizer.calls(), 2);
        assert_eq!(outcome.failed_count, 0);
        assert!(outcome.warnings.is_empty());
        assert!(outcome.results.iter().all(|r| r.categorization_succeeded));
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_retries_fall_back_to_defaults() {
        let categorizer = ScriptedCategorizer::new(vec![
            Script::Err(network_error),
            Script::Err(network_error),
            Script::Err(network_error),
        ]);
        let batch = BatchCategorizer::new(categorizer.clone(), BatchConfig::default());

        let outcome = batch.categorize_all(&records(3), None).await;

        assert_eq!(categorizer.calls(), 3);
        assert_eq!(outcome.failed_count, 3);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(
            outcome.results,
            vec![CategorizationResult::default_fallback(); 3]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn progress_reports_after_every_group() {
        let categorizer = ScriptedCategorizer::new(vec![]);
        let batch = BatchCategorizer::new(categorizer, BatchConfig::default());

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let progress: Box<ProgressFn> =
            Box::new(move |processed, total| seen_clone.lock().unwrap().push((processed, total)));

        batch.categorize_all(&records(12), Some(&*progress)).await;

        assert_eq!(*seen.lock().unwrap(), vec![(5, 12), (10, 12), (12, 12)]);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_input_is_a_no_op() {
        let categorizer = ScriptedCategorizer::new(vec![]);
        let batch = BatchCategorizer::new(categorizer.clone(), BatchConfig::default());

        let outcome = batch.categorize_all(&[], None).await;

        assert_eq!(categorizer.calls(), 0);
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.failed_count, 0);
    }
}
