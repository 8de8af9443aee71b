//! End-to-end tests of the Locker lifecycle.

use locker::{
    CatalogEvent, ContentHasher, InMemoryByteStorage, InMemoryGateway, Locker, LockerConfig,
    MediaKind, PersistenceGateway, RelationEvent, keys,
};
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_open_save_shutdown_reopen() {
    let temp = TempDir::new().unwrap();
    let config = LockerConfig::rooted_at(temp.path());

    let locker = Locker::open(config.clone()).await.unwrap();
    locker
        .media()
        .save(b"first photo", "photo1.jpg", "bob")
        .await
        .unwrap();
    locker
        .media()
        .save(b"second photo", "photo2.jpg", "bob")
        .await
        .unwrap();
    locker
        .media()
        .save(b"a video", "video1.mov", "bob")
        .await
        .unwrap();
    locker.media().delete(1).await.unwrap();
    locker.interactions().register("alice", "bob").await.unwrap();
    locker.shutdown().await.unwrap();

    assert!(config.persistence.state_file.exists());

    let locker = Locker::open(config).await.unwrap();
    let items = locker.media().items().await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].file_name(), "photo1.jpg");
    assert_eq!(items[0].content_hash(), &ContentHasher::digest(b"first photo"));
    assert_eq!(items[1].file_name(), "video1.mov");
    assert_eq!(items[1].kind(), MediaKind::Video);
    assert_eq!(items[1].content_hash(), &ContentHasher::digest(b"a video"));
    assert!(locker.interactions().can_message("bob", "alice").await);
}

#[tokio::test]
async fn test_stores_share_one_state_document() {
    let gateway = InMemoryGateway::new();
    let locker = Locker::with_backends(
        LockerConfig::default(),
        Arc::new(InMemoryByteStorage::new()),
        Arc::new(gateway.clone()),
    )
    .await
    .unwrap();

    locker.media().save(b"x", "x.png", "carol").await.unwrap();
    locker.interactions().register("carol", "dave").await.unwrap();

    for key in [keys::MEDIA_CATALOG, keys::MEDIA_METADATA, keys::INTERACTIONS] {
        assert!(gateway.get(key).await.unwrap().is_some(), "missing {}", key);
    }
}

#[tokio::test]
async fn test_record_view_links_viewer_and_uploader() {
    let locker = Locker::with_backends(
        LockerConfig::default(),
        Arc::new(InMemoryByteStorage::new()),
        Arc::new(InMemoryGateway::new()),
    )
    .await
    .unwrap();
    locker.media().save(b"x", "x.png", "carol").await.unwrap();

    // Own uploads do not count
    locker.record_view("carol", 0).await.unwrap();
    assert!(locker.interactions().is_empty().await);

    let item = locker.record_view("dave", 0).await.unwrap();
    assert_eq!(item.uploaded_by(), "carol");
    assert!(locker.interactions().can_message("carol", "dave").await);

    assert!(locker.record_view("dave", 3).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_event_capacity_from_config() {
    let mut config = LockerConfig::default();
    config.events.channel_capacity = 1;
    let locker = Locker::with_backends(
        config,
        Arc::new(InMemoryByteStorage::new()),
        Arc::new(InMemoryGateway::new()),
    )
    .await
    .unwrap();
    let mut events = locker.media().subscribe();
    let mut relation_events = locker.interactions().subscribe();

    locker.media().save(b"a", "a.jpg", "erin").await.unwrap();
    locker.media().save(b"b", "b.jpg", "erin").await.unwrap();
    locker.record_view("frank", 0).await.unwrap();
    locker.record_view("gina", 1).await.unwrap();

    // The first notification was overwritten by the second
    assert!(events.recv().await.is_err());
    assert!(matches!(
        events.recv().await.unwrap(),
        CatalogEvent::Saved { .. }
    ));

    assert!(relation_events.recv().await.is_err());
    assert_eq!(
        relation_events.recv().await.unwrap(),
        RelationEvent::Linked {
            first: "gina".to_string(),
            second: "erin".to_string()
        }
    );
}
