//! Configuration resolution for leadscope-ingest
//!
//! Multi-tier API key resolution with Database → ENV → TOML priority.

use leadscope_common::config::TomlConfig;
use leadscope_common::{Error, Result};
use sqlx::{Pool, Sqlite};
use tracing::{info, warn};

/// Environment variable holding the Gemini API key (tier 2)
pub const GEMINI_API_KEY_ENV: &str = "LEADSCOPE_GEMINI_API_KEY";

/// Resolve the Gemini API key from 3-tier configuration
///
/// **Priority:** Database → ENV → TOML
pub async fn resolve_gemini_api_key(
    db: &Pool<Sqlite>,
    toml_config: &TomlConfig,
) -> Result<String> {
    let db_key = crate::db::settings::get_gemini_api_key(db).await?;
    let env_key = std::env::var(GEMINI_API_KEY_ENV).ok();
    let toml_key = toml_config.gemini_api_key.clone();

    // only keys that would actually resolve count as sources
    let sources: Vec<&str> = [
        db_key.as_deref().filter(|k| is_valid_key(k)).map(|_| "database"),
        env_key.as_deref().filter(|k| is_valid_key(k)).map(|_| "environment"),
        toml_key.as_deref().filter(|k| is_valid_key(k)).map(|_| "TOML"),
    ]
    .into_iter()
    .flatten()
    .collect();

    if sources.len() > 1 {
        warn!(
            "Gemini API key found in multiple sources: {}. Using {} (highest priority).",
            sources.join(", "),
            sources[0]
        );
    }

    for (key, source) in [
        (db_key, "database"),
        (env_key, "environment variable"),
        (toml_key, "TOML config"),
    ] {
        if let Some(key) = key {
            if is_valid_key(&key) {
                info!("Gemini API key loaded from {}", source);
                return Ok(key);
            }
        }
    }

    Err(Error::Config(format!(
        "Gemini API key not configured. Please configure using one of:\n\
         1. API: PUT /settings/api-key\n\
         2. Environment: {}=your-key-here\n\
         3. TOML config: ~/.config/leadscope/leadscope.toml (gemini_api_key = \"your-key\")",
        GEMINI_API_KEY_ENV
    )))
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}
