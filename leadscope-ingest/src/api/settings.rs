//! Settings endpoint
//!
//! PUT /settings/api-key stores the Gemini key in the database (the
//! authoritative configuration tier) and best-effort syncs it to the TOML
//! file so it survives a database reset.

use axum::{extract::State, routing::put, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{ApiError, ApiResult, AppState};

/// Request payload for setting the Gemini API key
#[derive(Debug, Deserialize)]
pub struct SetApiKeyRequest {
    pub api_key: String,
}

/// Response payload for API key configuration
#[derive(Debug, Serialize)]
pub struct SetApiKeyResponse {
    pub success: bool,
    pub message: String,
}

/// PUT /settings/api-key
///
/// **Errors:**
/// - 400 Bad Request: empty or whitespace-only key
/// - 500 Internal Server Error: database write failure
///
/// TOML sync failures log a warning but do not fail the request.
pub async fn set_gemini_api_key(
    State(state): State<AppState>,
    Json(payload): Json<SetApiKeyRequest>,
) -> ApiResult<Json<SetApiKeyResponse>> {
    if !crate::config::is_valid_key(&payload.api_key) {
        return Err(ApiError::BadRequest(
            "API key cannot be empty or whitespace-only".to_string(),
        ));
    }

    crate::db::settings::set_gemini_api_key(&state.db, payload.api_key.clone())
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to save API key to database: {}", e)))?;

    info!("Gemini API key configured via API");

    match sync_key_to_toml(&payload.api_key) {
        Ok(path) => info!("API key synced to TOML: {}", path.display()),
        Err(e) => warn!("TOML sync failed (database write succeeded): {}", e),
    }

    Ok(Json(SetApiKeyResponse {
        success: true,
        message: "Gemini API key configured successfully".to_string(),
    }))
}

fn sync_key_to_toml(api_key: &str) -> leadscope_common::Result<std::path::PathBuf> {
    let path = leadscope_common::config::config_file_path()?;
    let mut config = leadscope_common::config::load_toml_config_from(&path)?;
    config.gemini_api_key = Some(api_key.to_string());
    leadscope_common::config::write_toml_config(&config, &path)?;
    Ok(path)
}

/// Build settings routes
pub fn settings_routes() -> Router<AppState> {
    Router::new().route("/settings/api-key", put(set_gemini_api_key))
}
