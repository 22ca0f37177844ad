//! Batch driver behaviour over real directories with an in-memory store

mod common;

use common::{config_for, valid_user, write_json, write_raw, RecordingStore};
use duel_ingest::{BatchDriver, BatchError, IngestConfig, UserFileValidator};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn driver(config: IngestConfig, store: Arc<RecordingStore>) -> BatchDriver {
    BatchDriver::new(config, Arc::new(UserFileValidator::new().unwrap()), store)
}

#[tokio::test]
async fn test_one_unparseable_file_does_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..5 {
        write_json(dir.path(), &format!("user{i}.json"), &valid_user(&format!("u{i}")));
    }
    write_raw(dir.path(), "broken.json", "{\"user_id\": [[[");

    let store = Arc::new(RecordingStore::default());
    let summary = driver(config_for(dir.path()), store.clone()).run().await.unwrap();

    assert_eq!(summary.files_attempted, 6);
    assert_eq!(summary.inserted, 5);
    assert_eq!(summary.parse_failures, 1);
    assert_eq!(store.rows().len(), 5);
}

#[tokio::test]
async fn test_truncated_file_is_repaired_and_stored() {
    let dir = tempfile::tempdir().unwrap();
    let text = serde_json::to_string(&valid_user("cut")).unwrap();
    write_raw(dir.path(), "cut.json", &text[..text.len() - 1]);

    let store = Arc::new(RecordingStore::default());
    let summary = driver(config_for(dir.path()), store.clone()).run().await.unwrap();

    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.repaired, 1);
    assert_eq!(store.rows()[0].user_id.as_deref(), Some("cut"));
}

#[tokio::test]
async fn test_invalid_and_rejected_files_are_counted_separately() {
    let dir = tempfile::tempdir().unwrap();
    write_json(dir.path(), "good.json", &valid_user("good"));
    write_json(dir.path(), "dupe.json", &valid_user("dupe"));

    let mut extra_key = valid_user("extra");
    extra_key["nickname"] = json!("Dal");
    write_json(dir.path(), "extra.json", &extra_key);

    let store = Arc::new(RecordingStore::rejecting(&["dupe.json"]));
    let summary = driver(config_for(dir.path()), store.clone()).run().await.unwrap();

    assert_eq!(summary.files_attempted, 3);
    assert_eq!(summary.inserted, 1);
    assert_eq!(summary.validation_failures, 1);
    assert_eq!(summary.store_failures, 1);
    assert_eq!(store.file_names(), vec!["good.json"]);
}

#[tokio::test]
async fn test_hidden_and_foreign_files_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    write_json(dir.path(), "user.json", &valid_user("u"));
    write_json(dir.path(), ".user.json", &valid_user("hidden"));
    write_raw(dir.path(), "README.md", "# exports");

    let store = Arc::new(RecordingStore::default());
    let summary = driver(config_for(dir.path()), store.clone()).run().await.unwrap();

    assert_eq!(summary.files_attempted, 1);
    assert_eq!(store.file_names(), vec!["user.json"]);
}

#[tokio::test]
async fn test_file_cap_limits_attempts() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..8 {
        write_json(dir.path(), &format!("{i}.json"), &valid_user(&i.to_string()));
    }

    let config = IngestConfig {
        max_files: 3,
        ..config_for(dir.path())
    };
    let store = Arc::new(RecordingStore::default());
    let summary = driver(config, store.clone()).run().await.unwrap();

    assert_eq!(summary.files_attempted, 3);
    assert_eq!(store.rows().len(), 3);
}

#[tokio::test]
async fn test_concurrent_run_keeps_counts_exact() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..20 {
        write_json(dir.path(), &format!("user{i}.json"), &valid_user(&i.to_string()));
    }
    write_raw(dir.path(), "bad.json", "not json at all");

    let config = IngestConfig {
        concurrency: 4,
        ..config_for(dir.path())
    };
    let store = Arc::new(RecordingStore::default());
    let summary = driver(config, store.clone()).run().await.unwrap();

    assert_eq!(summary.files_attempted, 21);
    assert_eq!(summary.inserted, 20);

    let mut names = store.file_names();
    names.dedup();
    assert_eq!(names.len(), 20);
}

#[tokio::test]
async fn test_schema_failure_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_json(dir.path(), "user.json", &valid_user("u"));

    let store = Arc::new(RecordingStore {
        fail_schema: true,
        ..RecordingStore::default()
    });
    let err = driver(config_for(dir.path()), store.clone()).run().await.unwrap_err();

    assert!(matches!(err, BatchError::Schema(_)));
    assert_eq!(store.schema_calls.load(Ordering::SeqCst), 1);
    assert!(store.rows().is_empty());
}

#[tokio::test]
async fn test_missing_input_directory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(RecordingStore::default());

    let err = driver(config_for(&dir.path().join("nope")), store)
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, BatchError::ListDir { .. }));
}

#[tokio::test]
async fn test_sanitized_row_reaches_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut user = valid_user("placeholder");
    user["name"] = json!("???");
    user["email"] = json!("invalid-email");
    user["advocacy_programs"][0]["brand"] = json!(12345);
    user["advocacy_programs"][0]["total_sales_attributed"] = json!("no-data");
    user["advocacy_programs"][0]["tasks_completed"][0]["platform"] = json!(123);
    user["advocacy_programs"][0]["tasks_completed"][0]["reach"] = json!(-1000);
    write_json(dir.path(), "p.json", &user);

    let store = Arc::new(RecordingStore::default());
    driver(config_for(dir.path()), store.clone()).run().await.unwrap();

    let row = &store.rows()[0];
    assert_eq!(row.name, None);
    assert_eq!(row.email, None);
    assert_eq!(row.brand, "12345");
    assert_eq!(row.platform, "123");
    assert_eq!(row.total_sales_attributed, None);
    assert_eq!(row.reach, None);
    assert_eq!(row.shares, 15);
}
