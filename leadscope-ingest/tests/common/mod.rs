//! Shared helpers for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use leadscope_ingest::models::{
    CategorizationResult, SectorPrimary, TranscriptRecord, UrgencyLevel, VolumeLevel,
};
use leadscope_ingest::services::{Categorizer, CategorizerError};
use sqlx::SqlitePool;
use std::sync::atomic::{AtomicUsize, Ordering};

pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePool::connect(":memory:").await.unwrap();
    leadscope_ingest::db::init_tables(&pool).await.unwrap();
    pool
}

/// Deterministic categorizer double: derives the categorization from
/// transcript keywords, so tests can assert on persisted values without a
/// live API.
pub struct StubCategorizer {
    pub calls: AtomicUsize,
    pub always_rate_limited: bool,
}

impl StubCategorizer {
    pub fn ok() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            always_rate_limited: false,
        }
    }

    pub fn rate_limited() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            always_rate_limited: true,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn categorize(&self, transcript: &str) -> CategorizationResult {
        let lower = transcript.to_lowercase();
        let mut result = CategorizationResult::default_fallback();

        result.sector_primary = if lower.contains("clínica") {
            SectorPrimary::Health
        } else if lower.contains("software") {
            SectorPrimary::Technology
        } else {
            SectorPrimary::Other
        };
        result.volume_level = if lower.contains("muchas consultas") {
            VolumeLevel::VeryHigh
        } else {
            VolumeLevel::Medium
        };
        if lower.contains("urgente") {
            result.urgency_level = UrgencyLevel::High;
        }
        result.source_detail = "Stub".to_string();
        result
    }
}

#[async_trait]
impl Categorizer for StubCategorizer {
    async fn categorize_one(
        &self,
        transcript: &str,
        _client_name: &str,
    ) -> Result<CategorizationResult, CategorizerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.always_rate_limited {
            return Err(CategorizerError::RateLimited("quota exceeded".to_string()));
        }
        Ok(self.categorize(transcript))
    }

    async fn categorize_batch(
        &self,
        transcripts: &[String],
        _client_names: &[String],
        _expected_count: usize,
    ) -> Result<Vec<CategorizationResult>, CategorizerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.always_rate_limited {
            return Err(CategorizerError::RateLimited("quota exceeded".to_string()));
        }
        Ok(transcripts.iter().map(|t| self.categorize(t)).collect())
    }
}

pub fn record(name: &str, date: &str, transcript: &str) -> TranscriptRecord {
    TranscriptRecord {
        client_name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: "600123456".to_string(),
        meeting_date: date.parse().unwrap(),
        assigned_seller: "Laura".to_string(),
        closed: false,
        transcript: transcript.to_string(),
    }
}
