//! Unit tests for the BookmarkStore public API.
//!
//! These tests exercise bookmark CRUD through `BookmarkStoreTrait`, using an
//! in-memory SQLite database unless persistence itself is under test.

use std::sync::Arc;

use jobmark::database::Database;
use jobmark::managers::bookmark_store::{BookmarkStore, BookmarkStoreTrait, StoreLocation};
use jobmark::types::errors::StorageError;
use jobmark::types::job::{JobId, JobRecord};

fn baker() -> JobRecord {
    let mut job = JobRecord::new(42i64, "Baker");
    job.primary_details.place = "Pune".to_string();
    job.primary_details.salary = "15000".to_string();
    job.whatsapp_no = "9999999999".to_string();
    job
}

async fn setup() -> BookmarkStore {
    let store = BookmarkStore::in_memory();
    store.initialize().await.expect("initialize in-memory store");
    store
}

#[tokio::test]
async fn test_bookmark_single_job() {
    let store = setup().await;
    store.upsert(&baker()).await.unwrap();

    let records = store.list().await.unwrap();
    assert_eq!(records.len(), 1);
    let rec = &records[0];
    assert_eq!(rec.id.as_str(), "42");
    assert_eq!(rec.title, "Baker");
    assert_eq!(rec.location, "Pune");
    assert_eq!(rec.salary.as_deref(), Some("15000"));
    assert_eq!(rec.phone.as_deref(), Some("9999999999"));
    assert!(!rec.saved_at.is_empty());

    assert!(store.exists(&JobId::from("42")).await.unwrap());
}

#[tokio::test]
async fn test_numeric_and_string_ids_address_same_row() {
    let store = setup().await;
    store.upsert(&baker()).await.unwrap();

    assert!(store.exists(&JobId::from(42i64)).await.unwrap());
    assert!(store.exists(&JobId::from("42")).await.unwrap());
    assert!(store.get(&JobId::from(42u64)).await.unwrap().is_some());
}

#[tokio::test]
async fn test_list_preserves_bookmark_order() {
    let store = setup().await;
    for id in ["1", "2", "3"] {
        store.upsert(&JobRecord::new(id, format!("Job {}", id))).await.unwrap();
    }

    let ids: Vec<String> = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id.to_string())
        .collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[tokio::test]
async fn test_list_is_ordered_by_saved_at() {
    let store = setup().await;
    for n in 0..20i64 {
        store.upsert(&JobRecord::new(n, "Job")).await.unwrap();
    }
    let records = store.list().await.unwrap();
    assert!(records.windows(2).all(|w| w[0].saved_at <= w[1].saved_at));
}

#[tokio::test]
async fn test_bookmark_then_remove() {
    let store = setup().await;
    store.upsert(&JobRecord::new("5", "Painter")).await.unwrap();
    store.remove(&JobId::from("5")).await.unwrap();

    assert!(!store.exists(&JobId::from("5")).await.unwrap());
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_remove_absent_id_is_noop() {
    let store = setup().await;
    store.upsert(&JobRecord::new("1", "Clerk")).await.unwrap();

    store.remove(&JobId::from("999")).await.unwrap();
    assert_eq!(store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_empty_store_lists_nothing() {
    let store = setup().await;
    assert!(store.list().await.unwrap().is_empty());
    assert!(store.get(&JobId::from("1")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_rebookmark_is_idempotent_and_keeps_position() {
    let store = setup().await;
    store.upsert(&JobRecord::new("1", "Clerk")).await.unwrap();
    store.upsert(&JobRecord::new("2", "Driver")).await.unwrap();
    let first_saved = store.get(&JobId::from("1")).await.unwrap().unwrap().saved_at;

    let mut updated = JobRecord::new("1", "Senior Clerk");
    updated.company_name = "Acme".to_string();
    store.upsert(&updated).await.unwrap();

    let records = store.list().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id.as_str(), "1");
    assert_eq!(records[0].title, "Senior Clerk");
    assert_eq!(records[0].company, "Acme");
    assert_eq!(records[0].saved_at, first_saved);
}

#[tokio::test]
async fn test_initialize_is_idempotent() {
    let store = BookmarkStore::in_memory();
    store.initialize().await.unwrap();
    store.upsert(&JobRecord::new("1", "Clerk")).await.unwrap();
    store.initialize().await.unwrap();
    assert_eq!(store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_concurrent_first_use_shares_one_handle() {
    let store = Arc::new(BookmarkStore::in_memory());

    let mut tasks = Vec::new();
    for n in 0..8i64 {
        let store = store.clone();
        tasks.push(tokio::spawn(async move {
            store.initialize().await?;
            store.upsert(&JobRecord::new(n, "Job")).await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    // Separate in-memory handles would each hold a subset of the rows.
    assert_eq!(store.list().await.unwrap().len(), 8);
}

#[tokio::test]
async fn test_bookmarks_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("jobs.db");

    {
        let store = BookmarkStore::open_path(&path);
        store.initialize().await.unwrap();
        store.upsert(&baker()).await.unwrap();
        store.upsert(&JobRecord::new("7", "Tailor")).await.unwrap();
    }

    let store = BookmarkStore::open_path(&path);
    assert_eq!(store.location(), &StoreLocation::File(path.clone()));
    store.initialize().await.unwrap();
    let ids: Vec<String> = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id.to_string())
        .collect();
    assert_eq!(ids, vec!["42", "7"]);
}

#[tokio::test]
async fn test_unusable_path_fails_every_operation() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("occupied");
    std::fs::write(&file, b"not a directory").unwrap();
    let store = BookmarkStore::open_path(file.join("jobs.db"));

    assert!(matches!(
        store.initialize().await,
        Err(StorageError::Unavailable(_))
    ));
    assert!(matches!(
        store.list().await,
        Err(StorageError::Unavailable(_))
    ));
    assert!(matches!(
        store.upsert(&baker()).await,
        Err(StorageError::Unavailable(_))
    ));
}

#[tokio::test]
async fn test_new_bookmark_sorts_after_row_from_future_clock() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.db");
    let future = "2999-01-01 00:00:00.000";
    {
        let db = Database::open(&path).unwrap();
        db.connection()
            .execute(
                "INSERT INTO bookmarks (id, title, saved_at) VALUES ('7', 'Tailor', ?1)",
                [future],
            )
            .unwrap();
    }

    // The wall clock is now far behind the stored row.
    let store = BookmarkStore::open_path(&path);
    store.upsert(&JobRecord::new(8i64, "Mason")).await.unwrap();

    let records = store.list().await.unwrap();
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["7", "8"]);
    assert!(records[1].saved_at.as_str() >= future);
}
