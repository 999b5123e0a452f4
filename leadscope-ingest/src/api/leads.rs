//! Lead listing endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::cmp::Ordering;

use crate::db;
use crate::models::EnrichedRecord;
use crate::{ApiResult, AppState};

/// One scored lead
///
/// Scores are derived at read time, never persisted, so scoring config
/// changes apply to historical records immediately.
#[derive(Debug, Serialize)]
pub struct LeadEntry {
    pub lead_score: f64,
    #[serde(flatten)]
    pub record: EnrichedRecord,
}

/// Lead listing response
#[derive(Debug, Serialize)]
pub struct LeadsResponse {
    pub count: usize,
    pub leads: Vec<LeadEntry>,
}

/// GET /leads
///
/// All persisted records with recomputed lead scores, highest first.
pub async fn list_leads(State(state): State<AppState>) -> ApiResult<Json<LeadsResponse>> {
    let records = db::clients::load_all(&state.db).await?;

    let mut leads: Vec<LeadEntry> = records
        .into_iter()
        .map(|record| LeadEntry {
            lead_score: state.scorer.score(&record),
            record,
        })
        .collect();

    leads.sort_by(|a, b| {
        b.lead_score
            .partial_cmp(&a.lead_score)
            .unwrap_or(Ordering::Equal)
    });

    let count = leads.len();
    Ok(Json(LeadsResponse { count, leads }))
}

/// Build lead routes
pub fn leads_routes() -> Router<AppState> {
    Router::new().route("/leads", get(list_leads))
}
