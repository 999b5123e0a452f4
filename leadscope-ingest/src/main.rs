//! leadscope-ingest - Sales Transcript Ingest Service
//!
//! Ingests sales meeting transcripts, categorizes them in batches through
//! the Gemini API, and serves scored leads over HTTP REST.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use leadscope_ingest::services::GeminiClient;
use leadscope_ingest::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting leadscope-ingest");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Optional TOML config (lowest-priority tier)
    let toml_config = leadscope_common::config::load_toml_config()?;

    // Open or create database
    let db_path = toml_config
        .database_path
        .clone()
        .unwrap_or_else(leadscope_common::config::default_database_path);
    info!("Database: {}", db_path.display());

    let db_pool = leadscope_ingest::db::init_database_pool(&db_path).await?;
    info!("Database connection established");

    // Resolve Gemini API key: Database → ENV → TOML
    let api_key =
        leadscope_ingest::config::resolve_gemini_api_key(&db_pool, &toml_config).await?;

    let categorizer = GeminiClient::new(api_key)
        .map_err(|e| anyhow::anyhow!("Failed to build Gemini client: {}", e))?;

    let state = AppState::new(db_pool, Arc::new(categorizer));
    let app = leadscope_ingest::build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:5731").await?;
    info!("Listening on http://127.0.0.1:5731");
    info!("Health check: http://127.0.0.1:5731/health");

    axum::serve(listener, app).await?;

    Ok(())
}
