//! Client record persistence
//!
//! The persistence layer exclusively owns merged transcript+categorization
//! rows. Writes are bulk and transactional; the identity-key set is read
//! once per append. Enum-valued columns store the same wire strings the
//! model produces, and list-valued columns store JSON text.

use crate::models::{
    CategorizationResult, Concern, EnrichedRecord, IdentityKey, TranscriptRecord,
};
use crate::services::expand::build_concerns_text;
use leadscope_common::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::{Pool, Sqlite};
use std::collections::HashSet;

/// Fetch all persisted identity keys (one read per append operation)
pub async fn fetch_existing_keys(db: &Pool<Sqlite>) -> Result<HashSet<IdentityKey>> {
    let rows: Vec<(String, String, String)> =
        sqlx::query_as("SELECT client_name, email, meeting_date FROM clients")
            .fetch_all(db)
            .await?;

    Ok(rows
        .into_iter()
        .map(|(client_name, email, meeting_date)| IdentityKey {
            client_name,
            email,
            meeting_date,
        })
        .collect())
}

/// Whether any records have been persisted yet
pub async fn has_any_data(db: &Pool<Sqlite>) -> Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clients")
        .fetch_one(db)
        .await?;
    Ok(count > 0)
}

/// Bulk-append enriched records in one transaction
pub async fn insert_records(db: &Pool<Sqlite>, records: &[EnrichedRecord]) -> Result<()> {
    let mut tx = db.begin().await?;

    for record in records {
        insert_one(&mut tx, record).await?;
    }

    tx.commit().await?;
    tracing::debug!(count = records.len(), "Inserted client records");
    Ok(())
}

/// Replace every persisted row with the given records (full reprocess)
pub async fn replace_all(db: &Pool<Sqlite>, records: &[EnrichedRecord]) -> Result<()> {
    let mut tx = db.begin().await?;

    sqlx::query("DELETE FROM clients").execute(&mut *tx).await?;
    for record in records {
        insert_one(&mut tx, record).await?;
    }

    tx.commit().await?;
    tracing::info!(count = records.len(), "Replaced all client records");
    Ok(())
}

async fn insert_one(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    record: &EnrichedRecord,
) -> Result<()> {
    let categorization = &record.categorization;

    sqlx::query(
        r#"
        INSERT INTO clients (
            client_name, email, phone, meeting_date, assigned_seller, closed,
            transcript, sector_primary, sector_secondary, volume_numeric_weekly,
            volume_level, seasonal_peak, source_primary, source_detail,
            concerns, urgency_level, upsell_opportunities, categorization_succeeded
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&record.record.client_name)
    .bind(&record.record.email)
    .bind(&record.record.phone)
    .bind(record.record.meeting_date.to_string())
    .bind(&record.record.assigned_seller)
    .bind(record.record.closed as i64)
    .bind(&record.record.transcript)
    .bind(categorization.sector_primary.as_str())
    .bind(&categorization.sector_secondary)
    .bind(categorization.volume_numeric_weekly)
    .bind(categorization.volume_level.as_str())
    .bind(categorization.seasonal_peak as i64)
    .bind(categorization.source_primary.as_str())
    .bind(&categorization.source_detail)
    .bind(to_json_text(&categorization.concerns)?)
    .bind(categorization.urgency_level.as_str())
    .bind(to_json_text(&categorization.upsell_opportunities)?)
    .bind(categorization.categorization_succeeded as i64)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Raw clients row as stored
#[derive(sqlx::FromRow)]
struct ClientRow {
    client_name: String,
    email: String,
    phone: String,
    meeting_date: String,
    assigned_seller: String,
    closed: i64,
    transcript: String,
    sector_primary: String,
    sector_secondary: Option<String>,
    volume_numeric_weekly: Option<i64>,
    volume_level: String,
    seasonal_peak: i64,
    source_primary: String,
    source_detail: String,
    concerns: String,
    urgency_level: String,
    upsell_opportunities: String,
    categorization_succeeded: i64,
}

/// Load every persisted record in insertion order
///
/// `concerns_text` is recomputed from the stored concerns here rather than
/// persisted: it is a derived cache, not a source of truth.
pub async fn load_all(db: &Pool<Sqlite>) -> Result<Vec<EnrichedRecord>> {
    let rows: Vec<ClientRow> = sqlx::query_as(
        r#"
        SELECT
            client_name, email, phone, meeting_date, assigned_seller, closed,
            transcript, sector_primary, sector_secondary, volume_numeric_weekly,
            volume_level, seasonal_peak, source_primary, source_detail,
            concerns, urgency_level, upsell_opportunities, categorization_succeeded
        FROM clients
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await?;

    rows.into_iter().map(row_to_record).collect()
}

fn row_to_record(row: ClientRow) -> Result<EnrichedRecord> {
    let concerns: Vec<Concern> = from_json_text(&row.concerns)?;
    let concerns_text = build_concerns_text(&concerns);

    let categorization = CategorizationResult {
        sector_primary: enum_from_wire(&row.sector_primary)?,
        sector_secondary: row.sector_secondary,
        volume_numeric_weekly: row.volume_numeric_weekly,
        volume_level: enum_from_wire(&row.volume_level)?,
        seasonal_peak: row.seasonal_peak != 0,
        source_primary: enum_from_wire(&row.source_primary)?,
        source_detail: row.source_detail,
        concerns,
        urgency_level: enum_from_wire(&row.urgency_level)?,
        upsell_opportunities: from_json_text(&row.upsell_opportunities)?,
        categorization_succeeded: row.categorization_succeeded != 0,
    };

    let meeting_date = row
        .meeting_date
        .parse()
        .map_err(|_| Error::Internal(format!("Invalid meeting date in database: {}", row.meeting_date)))?;

    Ok(EnrichedRecord {
        record: TranscriptRecord {
            client_name: row.client_name,
            email: row.email,
            phone: row.phone,
            meeting_date,
            assigned_seller: row.assigned_seller,
            closed: row.closed != 0,
            transcript: row.transcript,
        },
        categorization,
        concerns_text,
    })
}

fn to_json_text<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| Error::Internal(format!("Failed to serialize JSON column: {}", e)))
}

fn from_json_text<T: DeserializeOwned>(text: &str) -> Result<T> {
    serde_json::from_str(text)
        .map_err(|e| Error::Internal(format!("Invalid JSON in database: {}", e)))
}

/// Parse an enum column stored as its wire string
fn enum_from_wire<T: DeserializeOwned>(text: &str) -> Result<T> {
    serde_json::from_value(serde_json::Value::String(text.to_string()))
        .map_err(|e| Error::Internal(format!("Invalid enum value in database '{}': {}", text, e)))
}
