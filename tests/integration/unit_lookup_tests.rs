//! Shelf unit lookups through the cache

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use shelfsync::services::{CachePolicy, UnitCache};
use shelfsync::{ShelvesClient, UnitLookup};

use crate::fake::{FakeTransport, BASE};

async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_concurrent_lookups_make_one_request() {
    let fake = Arc::new(FakeTransport::gated());
    fake.respond_json("/shelves/unit/A", 200, json!({ "unit_id": "A", "shelf_name": "Audio" }));
    let client = ShelvesClient::new(fake.clone(), BASE, UnitCache::default());

    let first = tokio::spawn({
        let client = client.clone();
        async move { client.fetch_shelf_unit_detail("A").await }
    });
    let second = tokio::spawn({
        let client = client.clone();
        async move { client.fetch_shelf_unit_detail("A").await }
    });

    settle().await;
    assert_eq!(fake.calls_to("/shelves/unit/A"), 1);
    fake.release();

    let first = first.await.unwrap();
    let second = second.await.unwrap();

    assert_eq!(fake.calls_to("/shelves/unit/A"), 1);
    assert_eq!(first.as_ref().map(|d| d.id.as_str()), Some("A"));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_settled_lookup_ignores_upstream_changes() {
    let fake = Arc::new(FakeTransport::new());
    fake.respond_json("/shelves/unit/A", 200, json!({ "unit_id": "A", "room": "E 1" }));
    let client = ShelvesClient::new(fake.clone(), BASE, UnitCache::default());

    let before = client.fetch_shelf_unit_detail("A").await.unwrap();
    fake.respond_json("/shelves/unit/A", 200, json!({ "unit_id": "A", "room": "E 2" }));
    let after = client.fetch_shelf_unit_detail("A").await.unwrap();

    assert_eq!(before.room.as_deref(), Some("E 1"));
    assert_eq!(after, before);
    assert_eq!(fake.calls_to("/shelves/unit/A"), 1);
}

#[tokio::test]
async fn test_nested_shelf_id_becomes_unit_id() {
    let fake = Arc::new(FakeTransport::new());
    fake.respond_json(
        "/shelves/unit/U-1",
        200,
        json!({ "shelf": { "id": "S-7", "building": "HG" }, "columnIndex": "2" }),
    );
    let client = ShelvesClient::new(fake.clone(), BASE, UnitCache::default());

    let detail = client.fetch_shelf_unit_detail("U-1").await.unwrap();
    assert_eq!(detail.id, "S-7");
    assert_eq!(detail.shelf_id.as_deref(), Some("S-7"));
    assert_eq!(detail.building.as_deref(), Some("HG"));
    assert_eq!(detail.column_index, Some(2));
}

#[tokio::test]
async fn test_ids_are_percent_encoded() {
    let fake = Arc::new(FakeTransport::new());
    fake.respond_json("/shelves/unit/A%2F1%20b", 200, json!({ "id": "A/1 b" }));
    let client = ShelvesClient::new(fake.clone(), BASE, UnitCache::default());

    let detail = client.fetch_shelf_unit_detail(" A/1 b ").await.unwrap();
    assert_eq!(detail.id, "A/1 b");
}

#[tokio::test]
async fn test_not_found_and_failures_are_none() {
    let fake = Arc::new(FakeTransport::new());
    fake.respond_raw("/shelves/unit/bad-json", 200, "not json");
    fake.respond_raw("/shelves/unit/server-error", 500, "");
    fake.fail("/shelves/unit/offline", "timed out");
    let client = ShelvesClient::new(fake.clone(), BASE, UnitCache::default());

    assert_eq!(client.lookup_shelf_unit("gone").await, UnitLookup::NotFound);
    assert!(client.lookup_shelf_unit("bad-json").await.is_failure());
    assert!(client.lookup_shelf_unit("server-error").await.is_failure());
    assert!(client.lookup_shelf_unit("offline").await.is_failure());

    for id in ["gone", "bad-json", "server-error", "offline"] {
        assert_eq!(client.fetch_shelf_unit_detail(id).await, None);
    }
    assert_eq!(fake.calls_to("/shelves/unit/offline"), 1);
}

#[tokio::test]
async fn test_transient_failure_poisons_entry_by_default() {
    let fake = Arc::new(FakeTransport::new());
    fake.fail("/shelves/unit/A", "connection reset");
    let client = ShelvesClient::new(fake.clone(), BASE, UnitCache::default());

    assert_eq!(client.fetch_shelf_unit_detail("A").await, None);
    fake.respond_json("/shelves/unit/A", 200, json!({ "unit_id": "A" }));
    assert_eq!(client.fetch_shelf_unit_detail("A").await, None);
    assert_eq!(fake.calls_to("/shelves/unit/A"), 1);
}

#[tokio::test]
async fn test_failure_retry_policy_recovers() {
    let fake = Arc::new(FakeTransport::new());
    fake.fail("/shelves/unit/A", "connection reset");
    let cache = UnitCache::new(CachePolicy {
        ttl: None,
        failure_retry_after: Some(Duration::ZERO),
    });
    let client = ShelvesClient::new(fake.clone(), BASE, cache);

    assert!(client.lookup_shelf_unit("A").await.is_failure());
    fake.respond_json("/shelves/unit/A", 200, json!({ "unit_id": "A" }));
    assert!(client.fetch_shelf_unit_detail("A").await.is_some());
    assert_eq!(fake.calls_to("/shelves/unit/A"), 2);
}

#[tokio::test]
async fn test_blank_id_never_reaches_cache() {
    let fake = Arc::new(FakeTransport::new());
    let client = ShelvesClient::new(fake.clone(), BASE, UnitCache::default());

    assert_eq!(client.fetch_shelf_unit_detail("").await, None);
    assert_eq!(client.fetch_shelf_unit_detail(" \t ").await, None);
    assert!(client.unit_cache().is_empty());
}
