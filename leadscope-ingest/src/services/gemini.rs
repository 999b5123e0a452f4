//! Gemini API client for transcript categorization
//!
//! Wraps a single `generateContent` call per request. Response contract:
//! the model is asked for JSON output, but real responses occasionally
//! carry trailing commas or wrap a lone object in an array, so parsing
//! makes one recovery pass before giving up. All errors propagate to the
//! batch orchestrator un-retried.

use crate::models::CategorizationResult;
use crate::services::categorizer::{Categorizer, CategorizerError};
use crate::services::prompts;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Timeout for single-transcript requests
const SINGLE_TIMEOUT: Duration = Duration::from_secs(90);
/// Timeout for batch requests (longer prompt, longer generation)
const BATCH_TIMEOUT: Duration = Duration::from_secs(120);

static TRAILING_COMMA_BRACE: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*\}").unwrap());
static TRAILING_COMMA_BRACKET: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*\]").unwrap());

/// Subset of the Gemini generateContent response we consume
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Gemini categorization client
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Result<Self, CategorizerError> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| CategorizerError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Override the model name (tests, staged rollouts)
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Issue one generateContent call and return the response text
    async fn generate(&self, prompt: &str, timeout: Duration) -> Result<String, CategorizerError> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_BASE_URL, self.model, self.api_key
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": 0.1,
                "responseMimeType": "application/json",
            }
        });

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "Querying Gemini API");

        let response = self
            .http_client
            .post(&url)
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| CategorizerError::Network(e.to_string()))?;

        let status = response.status();

        if status.as_u16() == 429 {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CategorizerError::RateLimited(error_text));
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CategorizerError::Api(status.as_u16(), error_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| CategorizerError::Parse(e.to_string()))?;

        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| {
                CategorizerError::Parse("Response contains no candidate text".to_string())
            })?;

        Ok(text)
    }
}

#[async_trait]
impl Categorizer for GeminiClient {
    async fn categorize_one(
        &self,
        transcript: &str,
        client_name: &str,
    ) -> Result<CategorizationResult, CategorizerError> {
        let prompt = prompts::build_single_prompt(transcript, client_name);
        let text = self.generate(&prompt, SINGLE_TIMEOUT).await?;
        parse_object_response(&text)
    }

    async fn categorize_batch(
        &self,
        transcripts: &[String],
        client_names: &[String],
        expected_count: usize,
    ) -> Result<Vec<CategorizationResult>, CategorizerError> {
        let prompt = prompts::build_batch_prompt(transcripts, client_names, 0);
        let text = self.generate(&prompt, BATCH_TIMEOUT).await?;
        parse_array_response(&text, expected_count)
    }
}

/// Parse model output as JSON, retrying once with trailing commas stripped
fn parse_lenient(text: &str) -> Result<Value, CategorizerError> {
    let text = text.trim();
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(_) => {
            let cleaned = TRAILING_COMMA_BRACE.replace_all(text, "}");
            let cleaned = TRAILING_COMMA_BRACKET.replace_all(&cleaned, "]");
            serde_json::from_str(&cleaned).map_err(|e| CategorizerError::Parse(e.to_string()))
        }
    }
}

/// Parse a single-categorization response
///
/// A non-empty array is tolerated by taking its first element; an empty
/// array or any non-object shape is an error.
pub fn parse_object_response(text: &str) -> Result<CategorizationResult, CategorizerError> {
    let value = parse_lenient(text)?;

    let object = match value {
        Value::Array(items) => items
            .into_iter()
            .next()
            .ok_or_else(|| CategorizerError::Parse("Response is an empty array".to_string()))?,
        other => other,
    };

    if !object.is_object() {
        return Err(CategorizerError::Parse(format!(
            "Expected a JSON object, got {}",
            json_type_name(&object)
        )));
    }

    serde_json::from_value(object).map_err(|e| CategorizerError::Parse(e.to_string()))
}

/// Parse a batch response, enforcing exact result cardinality
pub fn parse_array_response(
    text: &str,
    expected_count: usize,
) -> Result<Vec<CategorizationResult>, CategorizerError> {
    let value = parse_lenient(text)?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(CategorizerError::Parse(format!(
                "Expected a JSON array, got {}",
                json_type_name(&other)
            )))
        }
    };

    if items.len() != expected_count {
        return Err(CategorizerError::CardinalityMismatch {
            expected: expected_count,
            actual: items.len(),
        });
    }

    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(|e| CategorizerError::Parse(e.to_string())))
        .collect()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
