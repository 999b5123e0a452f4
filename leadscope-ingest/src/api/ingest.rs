//! Ingest endpoints
//!
//! POST /ingest runs the batch pipeline over uploaded rows. POST /categorize
//! runs a single transcript through the cached categorizer without
//! persisting anything (preview path). DELETE /cache drops cached
//! categorizations.

use axum::{
    extract::State,
    routing::{delete, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{validate_rows, CategorizationResult, RawMeetingRow};
use crate::services::IngestSummary;
use crate::{ApiResult, AppState};

/// Ingest mode: append new rows or replace everything persisted
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum IngestMode {
    #[default]
    Append,
    Replace,
}

/// Request payload for an ingest run
#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    #[serde(default)]
    pub mode: IngestMode,
    pub rows: Vec<RawMeetingRow>,
}

/// POST /ingest
///
/// Validates every uploaded row, then runs the pipeline. Append mode skips
/// rows whose identity triple is already persisted; replace mode
/// recategorizes everything and overwrites the stored table.
pub async fn run_ingest(
    State(state): State<AppState>,
    Json(payload): Json<IngestRequest>,
) -> ApiResult<Json<IngestSummary>> {
    let records = validate_rows(&payload.rows)?;
    info!(rows = records.len(), mode = ?payload.mode, "Starting ingest run");

    let summary = match payload.mode {
        IngestMode::Append => state.pipeline.append(records, None).await?,
        IngestMode::Replace => state.pipeline.replace(records, None).await?,
    };

    Ok(Json(summary))
}

/// Request payload for a single-transcript preview
#[derive(Debug, Deserialize)]
pub struct CategorizeRequest {
    pub client_name: String,
    pub transcript: String,
}

/// POST /categorize
///
/// Never fails: categorization errors fall back to the default result,
/// distinguishable by `categorization_succeeded = false`.
pub async fn categorize_single(
    State(state): State<AppState>,
    Json(payload): Json<CategorizeRequest>,
) -> Json<CategorizationResult> {
    let result = state
        .single
        .categorize(&payload.transcript, &payload.client_name)
        .await;
    Json(result)
}

/// Response payload for the cache clear endpoint
#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    pub cleared: usize,
}

/// DELETE /cache
pub async fn clear_cache(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    let cleared = state.cache.len().await;
    state.cache.clear().await;
    info!(cleared, "Categorization cache cleared");
    Json(ClearCacheResponse { cleared })
}

/// Build ingest routes
pub fn ingest_routes() -> Router<AppState> {
    Router::new()
        .route("/ingest", post(run_ingest))
        .route("/categorize", post(categorize_single))
        .route("/cache", delete(clear_cache))
}
