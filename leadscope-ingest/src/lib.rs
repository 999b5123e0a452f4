//! leadscope-ingest - Sales transcript ingest and lead scoring service
//!
//! Categorizes meeting transcripts through the Gemini API in paced,
//! retried batches, deduplicates against persisted records, and serves
//! the resulting leads with recomputed scores over HTTP.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::services::batch::BatchConfig;
use crate::services::{
    BatchCategorizer, CategorizationCache, Categorizer, IngestPipeline, LeadScorer, ScoringConfig,
    SingleCategorizer,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Batch ingest pipeline (dedup, categorize, persist)
    pub pipeline: Arc<IngestPipeline>,
    /// Single-transcript categorization with TTL cache
    pub single: Arc<SingleCategorizer>,
    /// Shared categorization cache (exposed for the clear endpoint)
    pub cache: Arc<CategorizationCache>,
    /// Lead score calculator
    pub scorer: Arc<LeadScorer>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Wire the service graph around a categorizer implementation
    pub fn new(db: SqlitePool, categorizer: Arc<dyn Categorizer>) -> Self {
        let cache = Arc::new(CategorizationCache::default());
        let pipeline = Arc::new(IngestPipeline::new(
            db.clone(),
            BatchCategorizer::new(categorizer.clone(), BatchConfig::default()),
        ));
        let single = Arc::new(SingleCategorizer::new(categorizer, cache.clone()));

        Self {
            db,
            pipeline,
            single,
            cache,
            scorer: Arc::new(LeadScorer::new(ScoringConfig::default())),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::ingest_routes())
        .merge(api::leads_routes())
        .merge(api::settings_routes())
        .with_state(state)
}
