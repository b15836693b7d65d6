#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use object_store::memory::InMemory;
use shared_types::{MediaKind, Stop, Tour};
use tempfile::TempDir;

use super::{BucketStore, FileStore, MemoryStore, TourStore};

fn sample_tour(id: &str) -> Tour {
    Tour {
        id: id.to_string(),
        title: "Paris Walk".into(),
        description: "A stroll along the Seine".into(),
        author_id: "u1".into(),
        stops: vec![
            Stop {
                id: "s1".into(),
                title: "Louvre".into(),
                description: "art".into(),
                lat: 48.8606,
                lng: 2.3376,
                media_url: None,
                media_kind: MediaKind::None,
            },
            Stop {
                id: "s2".into(),
                title: "Pont Neuf".into(),
                description: "bridge".into(),
                lat: 48.8566,
                lng: 2.3415,
                media_url: Some("https://example.com/bridge.jpg".into()),
                media_kind: MediaKind::Image,
            },
        ],
        cover_image_url: None,
        created_at: None,
        updated_at: None,
    }
}

fn assert_is_generated_id(id: &str) {
    let digits = id.strip_prefix("tour-").unwrap();
    assert!(!digits.is_empty());
    assert!(digits.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn memory_round_trip() {
    let store = MemoryStore::new();

    let stored = store.upsert(sample_tour("tour-1")).await.unwrap();
    assert_eq!(stored.id, "tour-1");
    assert!(stored.created_at.is_some());
    assert!(stored.updated_at.is_some());

    let fetched = store.get_by_id("tour-1").await.unwrap().unwrap();
    assert_eq!(fetched, stored);
}

#[tokio::test]
async fn memory_generates_id_when_missing() {
    let store = MemoryStore::new();

    let stored = store.upsert(sample_tour("")).await.unwrap();
    assert_is_generated_id(&stored.id);

    let fetched = store.get_by_id(&stored.id).await.unwrap();
    assert!(fetched.is_some());
}

#[tokio::test]
async fn memory_upsert_replaces_by_id() {
    let store = MemoryStore::new();
    store.upsert(sample_tour("tour-1")).await.unwrap();

    let mut replacement = sample_tour("tour-1");
    replacement.title = "Paris at Night".into();
    replacement.stops.clear();
    store.upsert(replacement).await.unwrap();

    let all = store.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title, "Paris at Night");
    assert!(all[0].stops.is_empty());
}

#[tokio::test]
async fn memory_upsert_is_idempotent_modulo_timestamps() {
    let store = MemoryStore::new();

    let first = store.upsert(sample_tour("tour-1")).await.unwrap();
    let mut again = first.clone();
    again.updated_at = None;
    let mut second = store.upsert(again).await.unwrap();

    second.updated_at = first.updated_at;
    assert_eq!(first, second);
    assert_eq!(store.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn memory_delete_is_idempotent() {
    let store = MemoryStore::new();
    store.upsert(sample_tour("tour-1")).await.unwrap();

    store.delete_by_id("tour-1").await.unwrap();
    assert!(store.get_by_id("tour-1").await.unwrap().is_none());

    // Second delete of the same id is not an error.
    store.delete_by_id("tour-1").await.unwrap();
}

#[tokio::test]
async fn memory_preserves_insertion_order() {
    let store = MemoryStore::new();
    for id in ["tour-1", "tour-2", "tour-3"] {
        store.upsert(sample_tour(id)).await.unwrap();
    }

    // Replacing a record keeps its position in the sequence.
    let mut second = sample_tour("tour-2");
    second.title = "Updated".into();
    store.upsert(second).await.unwrap();

    let ids: Vec<_> = store
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec!["tour-1", "tour-2", "tour-3"]);
}

#[tokio::test]
async fn file_store_survives_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tours.json");

    let store = FileStore::load(&path).unwrap();
    let stored = store.upsert(sample_tour("tour-1")).await.unwrap();
    store.upsert(sample_tour("tour-2")).await.unwrap();
    store.delete_by_id("tour-2").await.unwrap();

    // Simulated restart: reload from disk and compare working sets.
    let reloaded = FileStore::load(&path).unwrap();
    let all = reloaded.list_all().await.unwrap();
    assert_eq!(all, vec![stored]);
}

#[tokio::test]
async fn file_store_starts_empty_without_document() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::load(dir.path().join("missing.json")).unwrap();
    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn file_store_treats_parse_failure_as_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tours.json");
    std::fs::write(&path, b"{not json").unwrap();

    let store = FileStore::load(&path).unwrap();
    assert!(store.list_all().await.unwrap().is_empty());

    // The store stays writable after discarding the corrupt document.
    store.upsert(sample_tour("tour-1")).await.unwrap();
    let reloaded = FileStore::load(&path).unwrap();
    assert_eq!(reloaded.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn file_store_document_is_a_json_array() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tours.json");

    let store = FileStore::load(&path).unwrap();
    store.upsert(sample_tour("tour-1")).await.unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(doc.as_array().unwrap().len(), 1);
    assert_eq!(doc[0]["id"], "tour-1");
    assert_eq!(doc[0]["authorId"], "u1");
}

#[tokio::test]
async fn bucket_store_round_trip() {
    let store = BucketStore::new(Arc::new(InMemory::new()));

    let stored = store.upsert(sample_tour("tour-1")).await.unwrap();
    let fetched = store.get_by_id("tour-1").await.unwrap().unwrap();
    assert_eq!(fetched, stored);

    assert!(store.get_by_id("unknown-id").await.unwrap().is_none());
}

#[tokio::test]
async fn bucket_store_lists_collection() {
    let store = BucketStore::new(Arc::new(InMemory::new()));
    store.upsert(sample_tour("tour-1")).await.unwrap();
    store.upsert(sample_tour("tour-2")).await.unwrap();

    let mut ids: Vec<_> = store
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["tour-1", "tour-2"]);
}

#[tokio::test]
async fn bucket_store_delete_is_idempotent() {
    let store = BucketStore::new(Arc::new(InMemory::new()));
    store.upsert(sample_tour("tour-1")).await.unwrap();

    store.delete_by_id("tour-1").await.unwrap();
    store.delete_by_id("tour-1").await.unwrap();
    assert!(store.get_by_id("tour-1").await.unwrap().is_none());
}
