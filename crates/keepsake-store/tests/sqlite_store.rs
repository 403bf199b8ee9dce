use keepsake_store::{KeyValueStore, Quota, SqliteStore};
use tempfile::TempDir;

#[test]
fn test_values_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.db");

    {
        let mut store = SqliteStore::open(&path, Quota::default()).unwrap();
        store.set("websiteAnalytics", r#"{"sessionId":"s","interactions":[]}"#).unwrap();
    }

    let store = SqliteStore::open(&path, Quota::default()).unwrap();
    assert_eq!(
        store.get("websiteAnalytics").unwrap().as_deref(),
        Some(r#"{"sessionId":"s","interactions":[]}"#)
    );
}

#[test]
fn test_open_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("storage.db");

    SqliteStore::open(&path, Quota::default()).unwrap();
    assert!(path.exists());
}

#[test]
fn test_quota_exceeded_keeps_previous_value() {
    let dir = TempDir::new().unwrap();
    let mut store = SqliteStore::open(&dir.path().join("s.db"), Quota::bytes(32)).unwrap();

    store.set("websiteAnalytics", "small").unwrap();
    let err = store.set("websiteAnalytics", &"x".repeat(64)).unwrap_err();

    assert!(err.is_quota_exceeded());
    assert_eq!(store.get("websiteAnalytics").unwrap().as_deref(), Some("small"));
}

#[test]
fn test_keys_with_prefix_and_remove_prefixed() {
    let dir = TempDir::new().unwrap();
    let mut store = SqliteStore::open(&dir.path().join("s.db"), Quota::default()).unwrap();

    store.set("websiteAnalytics", "live").unwrap();
    store.set("websiteAnalytics_archive_1", "old").unwrap();
    store.set("finalAnalytics", "final").unwrap();
    store.set("theme", "pink").unwrap();

    assert_eq!(
        store.keys_with_prefix("websiteAnalytics").unwrap(),
        vec!["websiteAnalytics", "websiteAnalytics_archive_1"]
    );

    assert_eq!(store.remove_prefixed("websiteAnalytics").unwrap(), 2);
    store.remove("finalAnalytics").unwrap();
    store.remove("never-written").unwrap();

    assert_eq!(store.keys().unwrap(), vec!["theme"]);
}

#[test]
fn test_schema_version_mismatch_recreates_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("s.db");

    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE entries (key TEXT, value TEXT, legacy INTEGER); PRAGMA user_version = 0;",
        )
        .unwrap();
        conn.execute("INSERT INTO entries VALUES ('stale', 'x', 1)", [])
            .unwrap();
    }

    let store = SqliteStore::open(&path, Quota::default()).unwrap();
    assert!(store.keys().unwrap().is_empty());
}
