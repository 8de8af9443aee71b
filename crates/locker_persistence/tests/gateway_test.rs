//! Tests shared by every persistence backend.

use locker_persistence::{
    InMemoryGateway, JsonFileGateway, PersistenceGateway, keys, load_record, to_record,
};
use serde_json::json;
use std::collections::BTreeMap;
use tempfile::TempDir;

async fn exercise_backend(gateway: &dyn PersistenceGateway) {
    assert!(gateway.get(keys::MEDIA_CATALOG).await.unwrap().is_none());

    let catalog = vec!["1/a.jpg".to_string(), "2/b.mov".to_string()];
    let mut relation = BTreeMap::new();
    relation.insert("alice".to_string(), vec!["bob".to_string()]);
    relation.insert("bob".to_string(), vec!["alice".to_string()]);

    gateway
        .set_many(vec![
            to_record(keys::MEDIA_CATALOG, &catalog).unwrap(),
            to_record(keys::INTERACTIONS, &relation).unwrap(),
        ])
        .await
        .unwrap();

    let loaded: Vec<String> = load_record(gateway, keys::MEDIA_CATALOG)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded, catalog);

    let loaded: BTreeMap<String, Vec<String>> = load_record(gateway, keys::INTERACTIONS)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded, relation);

    // Overwrite replaces the previous value
    gateway.set(keys::MEDIA_CATALOG, json!([])).await.unwrap();
    let loaded: Vec<String> = load_record(gateway, keys::MEDIA_CATALOG)
        .await
        .unwrap()
        .unwrap();
    assert!(loaded.is_empty());

    gateway.flush().await.unwrap();
}

#[tokio::test]
async fn test_in_memory_backend() {
    let gateway = InMemoryGateway::new();
    exercise_backend(&gateway).await;
}

#[tokio::test]
async fn test_json_file_backend() {
    let temp = TempDir::new().unwrap();
    let gateway = JsonFileGateway::open(temp.path().join("state.json"))
        .await
        .unwrap();
    exercise_backend(&gateway).await;
}

#[tokio::test]
async fn test_corrupt_metadata_does_not_hide_catalog() {
    let gateway = InMemoryGateway::new();
    gateway
        .set(keys::MEDIA_CATALOG, json!(["1/a.jpg"]))
        .await
        .unwrap();
    gateway
        .set(keys::MEDIA_METADATA, json!("garbage"))
        .await
        .unwrap();

    let catalog: Option<Vec<String>> = load_record(&gateway, keys::MEDIA_CATALOG).await.unwrap();
    let metadata: Option<BTreeMap<String, String>> =
        load_record(&gateway, keys::MEDIA_METADATA).await.unwrap();

    assert_eq!(catalog.unwrap(), vec!["1/a.jpg"]);
    assert!(metadata.is_none());
}
