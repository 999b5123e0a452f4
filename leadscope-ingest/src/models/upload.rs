//! Validation of uploaded meeting rows
//!
//! Rows arrive as loosely-typed JSON (spreadsheet exports are sloppy about
//! booleans and whitespace). Validation collects every row error instead of
//! stopping at the first, so the caller can report the whole upload at once.

use super::record::TranscriptRecord;
use chrono::NaiveDate;
use leadscope_common::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

/// One raw uploaded row, prior to validation
#[derive(Debug, Clone, Deserialize)]
pub struct RawMeetingRow {
    pub client_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// ISO date (YYYY-MM-DD)
    pub meeting_date: String,
    #[serde(default)]
    pub assigned_seller: String,
    /// Accepts bool, 0/1, or "true"/"false"/"0"/"1" in any case
    #[serde(default)]
    pub closed: Value,
    pub transcript: String,
}

/// Validate a batch of uploaded rows into transcript records
///
/// Returns `InvalidInput` listing every failed row when any row is invalid;
/// an empty upload is also rejected.
pub fn validate_rows(rows: &[RawMeetingRow]) -> Result<Vec<TranscriptRecord>> {
    if rows.is_empty() {
        return Err(Error::InvalidInput("Upload contains no rows".to_string()));
    }

    let mut records = Vec::with_capacity(rows.len());
    let mut errors = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        match validate_row(row) {
            Ok(record) => records.push(record),
            Err(msg) => errors.push(format!("row {}: {}", i + 1, msg)),
        }
    }

    if !errors.is_empty() {
        return Err(Error::InvalidInput(errors.join("; ")));
    }

    Ok(records)
}

fn validate_row(row: &RawMeetingRow) -> std::result::Result<TranscriptRecord, String> {
    let client_name = row.client_name.trim();
    if client_name.is_empty() {
        return Err("client name is required".to_string());
    }

    let meeting_date: NaiveDate = row
        .meeting_date
        .trim()
        .parse()
        .map_err(|_| format!("invalid meeting date '{}' (expected YYYY-MM-DD)", row.meeting_date))?;

    let closed = parse_closed(&row.closed)
        .ok_or_else(|| format!("invalid closed value '{}' (expected boolean or 0/1)", row.closed))?;

    let transcript = row.transcript.trim();
    if transcript.is_empty() {
        return Err("transcript is empty (required for categorization)".to_string());
    }

    Ok(TranscriptRecord {
        client_name: client_name.to_string(),
        email: row.email.trim().to_string(),
        phone: row.phone.trim().to_string(),
        meeting_date,
        assigned_seller: row.assigned_seller.trim().to_string(),
        closed,
        transcript: transcript.to_string(),
    })
}

/// Parse the flexible `closed` column: bool, 0/1, or their string forms
fn parse_closed(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        },
        // Absent column defaults to an open deal
        Value::Null => Some(false),
        _ => None,
    }
}
