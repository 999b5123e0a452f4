//! Cache-aware single-transcript categorization
//!
//! Used for one-off (re)categorizations outside the batch flow. Like the
//! batch orchestrator this path never raises: any failure degrades to the
//! default fallback with `categorization_succeeded = false`. Only
//! successful results are cached, so a transient failure does not pin the
//! fallback for the TTL.

use crate::models::CategorizationResult;
use crate::services::cache::CategorizationCache;
use crate::services::categorizer::Categorizer;
use std::sync::Arc;

/// Single-item categorization with an injected TTL cache
pub struct SingleCategorizer {
    categorizer: Arc<dyn Categorizer>,
    cache: Arc<CategorizationCache>,
}

impl SingleCategorizer {
    pub fn new(categorizer: Arc<dyn Categorizer>, cache: Arc<CategorizationCache>) -> Self {
        Self { categorizer, cache }
    }

    /// Categorize one transcript, consulting the cache first
    pub async fn categorize(&self, transcript: &str, client_name: &str) -> CategorizationResult {
        if let Some(cached) = self.cache.get(transcript, client_name).await {
            tracing::debug!(client = %client_name, "Categorization cache hit");
            return cached;
        }

        match self.categorizer.categorize_one(transcript, client_name).await {
            Ok(mut result) => {
                result.categorization_succeeded = true;
                self.cache
                    .insert(transcript, client_name, result.clone())
                    .await;
                result
            }
            Err(e) => {
                tracing::warn!(client = %client_name, error = %e, "Categorization failed, using default fallback");
                CategorizationResult::default_fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SectorPrimary;
    use crate::services::categorizer::CategorizerError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls; fails while `failures` is positive
    struct FlakyCategorizer {
        calls: AtomicUsize,
        failures: AtomicUsize,
    }

    #[async_trait]
    impl Categorizer for FlakyCategorizer {
        async fn categorize_one(
            &self,
            _transcript: &str,
            _client_name: &str,
        ) -> Result<CategorizationResult, CategorizerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failures.load(Ordering::SeqCst) > 0 {
                self.failures.fetch_sub(1, Ordering::SeqCst);
                return Err(CategorizerError::Network("boom".to_string()));
            }
            let mut result = CategorizationResult::default_fallback();
            result.sector_primary = SectorPrimary::Health;
            Ok(result)
        }

        async fn categorize_batch(
            &self,
            _transcripts: &[String],
            _client_names: &[String],
            _expected_count: usize,
        ) -> Result<Vec<CategorizationResult>, CategorizerError> {
            unimplemented!("not used by SingleCategorizer")
        }
    }

    fn flaky(failures: usize) -> Arc<FlakyCategorizer> {
        Arc::new(FlakyCategorizer {
            calls: AtomicUsize::new(0),
            failures: AtomicUsize::new(failures),
        })
    }

    #[tokio::test]
    async fn caches_successful_results() {
        let inner = flaky(0);
        let single = SingleCategorizer::new(inner.clone(), Arc::new(Default::default()));

        let first = single.categorize("hola", "Acme").await;
        let second = single.categorize("hola", "Acme").await;

        assert!(first.categorization_succeeded);
        assert_eq!(first, second);
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_degrades_to_fallback_and_is_not_cached() {
        let inner = flaky(1);
        let single = SingleCategorizer::new(inner.clone(), Arc::new(Default::default()));

        let first = single.categorize("hola", "Acme").await;
        assert!(!first.categorization_succeeded);
        assert_eq!(first, CategorizationResult::default_fallback());

        // next call retries the remote service and succeeds
        let second = single.categorize("hola", "Acme").await;
        assert!(second.categorization_succeeded);
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }
}
