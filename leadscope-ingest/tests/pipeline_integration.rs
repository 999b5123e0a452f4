//! End-to-end pipeline tests: dedup, batch categorization, persistence

mod common;

use common::{record, setup_test_db, StubCategorizer};
use leadscope_ingest::db;
use leadscope_ingest::services::batch::BatchConfig;
use leadscope_ingest::services::{BatchCategorizer, IngestPipeline};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

// Zero pacing keeps multi-group runs fast on the real clock; pausing the
// runtime clock instead would starve sqlx's background connect thread.
fn pipeline(db: SqlitePool, categorizer: Arc<StubCategorizer>) -> IngestPipeline {
    let config = BatchConfig {
        pacing: Duration::ZERO,
        ..BatchConfig::default()
    };
    IngestPipeline::new(db, BatchCategorizer::new(categorizer, config))
}

#[tokio::test]
async fn append_categorizes_and_persists() {
    let pool = setup_test_db().await;
    let categorizer = Arc::new(StubCategorizer::ok());
    let pipeline = pipeline(pool.clone(), categorizer.clone());

    let records = vec![
        record("Acme", "2024-01-01", "somos una clínica y es urgente"),
        record("Beta", "2024-01-02", "vendemos software"),
        record("Gamma", "2024-01-03", "recibimos muchas consultas"),
    ];

    let summary = pipeline.append(records, None).await.unwrap();

    assert_eq!(summary.rows_received, 3);
    assert_eq!(summary.rows_added, 3);
    assert_eq!(summary.duplicates_skipped, 0);
    assert_eq!(summary.failed_categorizations, 0);
    assert!(summary.warnings.is_empty());
    assert_eq!(categorizer.calls(), 1);

    let loaded = db::clients::load_all(&pool).await.unwrap();
    assert_eq!(loaded.len(), 3);
    assert!(loaded.iter().all(|r| r.categorization.categorization_succeeded));
    assert_eq!(loaded[0].record.client_name, "Acme");
    assert_eq!(
        loaded[0].categorization.sector_primary.as_str(),
        "Salud"
    );
}

#[tokio::test]
async fn append_skips_persisted_duplicates() {
    let pool = setup_test_db().await;
    let categorizer = Arc::new(StubCategorizer::ok());
    let pipeline = pipeline(pool.clone(), categorizer.clone());

    pipeline
        .append(
            vec![
                record("Acme", "2024-01-01", "primera reunión"),
                record("Beta", "2024-01-02", "primera reunión"),
            ],
            None,
        )
        .await
        .unwrap();

    // Acme/Beta repeat exactly; Gamma is new
    let summary = pipeline
        .append(
            vec![
                record("Acme", "2024-01-01", "primera reunión"),
                record("Beta", "2024-01-02", "primera reunión"),
                record("Gamma", "2024-01-03", "reunión nueva"),
            ],
            None,
        )
        .await
        .unwrap();

    assert_eq!(summary.rows_received, 3);
    assert_eq!(summary.rows_added, 1);
    assert_eq!(summary.duplicates_skipped, 2);

    let loaded = db::clients::load_all(&pool).await.unwrap();
    assert_eq!(loaded.len(), 3);
}

#[tokio::test]
async fn all_duplicates_is_a_no_op_without_remote_calls() {
    let pool = setup_test_db().await;
    let categorizer = Arc::new(StubCategorizer::ok());
    let pipeline = pipeline(pool.clone(), categorizer.clone());

    let rows = vec![record("Acme", "2024-01-01", "primera reunión")];
    pipeline.append(rows.clone(), None).await.unwrap();
    let calls_after_first = categorizer.calls();

    let summary = pipeline.append(rows, None).await.unwrap();

    assert_eq!(summary.rows_added, 0);
    assert_eq!(summary.duplicates_skipped, 1);
    assert_eq!(categorizer.calls(), calls_after_first);
}

#[tokio::test]
async fn quota_exhaustion_persists_fallback_rows() {
    let pool = setup_test_db().await;
    let categorizer = Arc::new(StubCategorizer::rate_limited());
    let pipeline = pipeline(pool.clone(), categorizer.clone());

    let summary = pipeline
        .append(
            vec![
                record("Acme", "2024-01-01", "hola"),
                record("Beta", "2024-01-02", "hola"),
            ],
            None,
        )
        .await
        .unwrap();

    // rows still land, flagged as failed, with a quota warning
    assert_eq!(summary.rows_added, 2);
    assert_eq!(summary.failed_categorizations, 2);
    assert_eq!(summary.warnings.len(), 1);
    // quota aborts retries: one remote call for the single group
    assert_eq!(categorizer.calls(), 1);

    let loaded = db::clients::load_all(&pool).await.unwrap();
    assert!(loaded.iter().all(|r| !r.categorization.categorization_succeeded));
    assert!(loaded
        .iter()
        .all(|r| r.categorization.sector_primary.as_str() == "Otros"));
}

#[tokio::test]
async fn replace_overwrites_persisted_rows() {
    let pool = setup_test_db().await;
    let categorizer = Arc::new(StubCategorizer::ok());
    let pipeline = pipeline(pool.clone(), categorizer.clone());

    pipeline
        .append(vec![record("Acme", "2024-01-01", "hola")], None)
        .await
        .unwrap();

    let summary = pipeline
        .replace(
            vec![
                record("Beta", "2024-02-01", "hola"),
                record("Gamma", "2024-02-02", "hola"),
            ],
            None,
        )
        .await
        .unwrap();

    assert_eq!(summary.rows_added, 2);
    assert_eq!(summary.duplicates_skipped, 0);

    let loaded = db::clients::load_all(&pool).await.unwrap();
    let names: Vec<&str> = loaded.iter().map(|r| r.record.client_name.as_str()).collect();
    assert_eq!(names, vec!["Beta", "Gamma"]);
}

#[tokio::test]
async fn progress_callback_sees_every_group() {
    let pool = setup_test_db().await;
    let categorizer = Arc::new(StubCategorizer::ok());
    let pipeline = pipeline(pool.clone(), categorizer);

    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    let progress: Box<leadscope_ingest::services::ProgressFn> =
        Box::new(move |processed, total| seen_clone.lock().unwrap().push((processed, total)));

    let records: Vec<_> = (0..7)
        .map(|i| record(&format!("Client{i}"), "2024-01-01", "hola"))
        .collect();
    pipeline.append(records, Some(&*progress)).await.unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![(5, 7), (7, 7)]);
}
