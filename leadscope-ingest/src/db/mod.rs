//! Database access for leadscope-ingest

pub mod clients;
pub mod settings;

use anyhow::Result;
use sqlx::SqlitePool;
use std::path::Path;

/// Initialize database connection pool
///
/// Connects to the leads database, creating the file and tables on first
/// run.
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Use proper SQLite URI with mode=rwc (read, write, create)
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;
    init_tables(&pool).await?;

    Ok(pool)
}

/// Create the clients and settings tables if they don't exist
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Denormalized transcript + categorization rows. The list-valued
    // categorization fields are stored as JSON text; booleans as 0/1.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS clients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            client_name TEXT NOT NULL,
            email TEXT NOT NULL DEFAULT '',
            phone TEXT NOT NULL DEFAULT '',
            meeting_date TEXT NOT NULL,
            assigned_seller TEXT NOT NULL DEFAULT '',
            closed INTEGER NOT NULL DEFAULT 0,
            transcript TEXT NOT NULL,
            sector_primary TEXT NOT NULL,
            sector_secondary TEXT,
            volume_numeric_weekly INTEGER,
            volume_level TEXT NOT NULL,
            seasonal_peak INTEGER NOT NULL DEFAULT 0,
            source_primary TEXT NOT NULL,
            source_detail TEXT NOT NULL DEFAULT '',
            concerns TEXT NOT NULL DEFAULT '[]',
            urgency_level TEXT NOT NULL,
            upsell_opportunities TEXT NOT NULL DEFAULT '[]',
            categorization_succeeded INTEGER NOT NULL DEFAULT 1,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database tables initialized (settings, clients)");

    Ok(())
}
