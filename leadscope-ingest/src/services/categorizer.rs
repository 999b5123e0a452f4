//! Categorizer capability boundary
//!
//! The remote model is nondeterministic and slow, so everything upstream of
//! this trait is written against it rather than against a concrete client.
//! Tests inject scripted implementations; production wires in
//! [`crate::services::gemini::GeminiClient`].

use crate::models::CategorizationResult;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from a single categorization request
///
/// This layer performs no retries; retry and fallback policy belongs to the
/// batch orchestrator.
#[derive(Debug, Error)]
pub enum CategorizerError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Parse error: {0}")]
    Parse(String),

    /// Batch response had the wrong number of elements. A hard contract
    /// violation, never treated as partial success.
    #[error("Expected {expected} results but received {actual}")]
    CardinalityMismatch { expected: usize, actual: usize },
}

impl CategorizerError {
    /// Whether this error signals quota exhaustion or rate limiting
    ///
    /// Besides the dedicated variant, provider error text is inspected for
    /// the usual signals, since quota failures also surface as generic API
    /// errors. Retrying these is certain to fail identically.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            CategorizerError::RateLimited(_) => true,
            CategorizerError::Api(429, _) => true,
            other => {
                let text = other.to_string().to_lowercase();
                text.contains("429") || text.contains("quota") || text.contains("rate")
            }
        }
    }
}

/// A remote categorization service
#[async_trait]
pub trait Categorizer: Send + Sync {
    /// Categorize a single transcript
    async fn categorize_one(
        &self,
        transcript: &str,
        client_name: &str,
    ) -> Result<CategorizationResult, CategorizerError>;

    /// Categorize a group of transcripts in one request
    ///
    /// Must return exactly `expected_count` results or fail.
    async fn categorize_batch(
        &self,
        transcripts: &[String],
        client_names: &[String],
        expected_count: usize,
    ) -> Result<Vec<CategorizationResult>, CategorizerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_detection() {
        assert!(CategorizerError::RateLimited("slow down".to_string()).is_rate_limited());
        assert!(CategorizerError::Api(429, "too many requests".to_string()).is_rate_limited());
        assert!(
            CategorizerError::Api(503, "Quota exceeded for model".to_string()).is_rate_limited()
        );
        assert!(CategorizerError::Network("rate limit hit".to_string()).is_rate_limited());

        assert!(!CategorizerError::Network("connection refused".to_string()).is_rate_limited());
        assert!(!CategorizerError::Parse("bad json".to_string()).is_rate_limited());
        assert!(!CategorizerError::CardinalityMismatch {
            expected: 5,
            actual: 4
        }
        .is_rate_limited());
    }
}
