//! The media catalog and its lifecycle.
//!
//! `MediaStore` owns two collections that must always agree: the ordered list
//! of locators (the catalog) and the metadata records keyed by locator. Both
//! sit behind one `RwLock`. Every mutation runs entirely under the write
//! guard: it stages the next catalog, performs the byte-storage step,
//! persists the staged catalog, and only then swaps it in. Readers therefore
//! see the catalog either fully before or fully after a mutation.

use crate::{
    ByteStorage, CatalogEvent, ContentHasher, Locator, MediaItem, MediaRecord, renamed_file_name,
};
use chrono::Utc;
use locker_error::{LockerResult, StorageError, StorageErrorKind};
use locker_persistence::{PersistenceGateway, keys, load_record, to_record};
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Default buffer for catalog change notifications.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Locators and their records, always mutated together.
#[derive(Debug, Clone, Default)]
struct Catalog {
    locators: Vec<Locator>,
    records: HashMap<Locator, MediaRecord>,
}

impl Catalog {
    fn item(&self, locator: &Locator) -> Option<MediaItem> {
        self.records
            .get(locator)
            .map(|record| MediaItem::from_record(locator.clone(), record))
    }

    fn items(&self) -> Vec<MediaItem> {
        self.locators
            .iter()
            .filter_map(|locator| self.item(locator))
            .collect()
    }

    fn locator_at(&self, index: usize) -> LockerResult<&Locator> {
        self.locators.get(index).ok_or_else(|| {
            StorageError::new(StorageErrorKind::NotFound(format!(
                "index {} (catalog has {} items)",
                index,
                self.locators.len()
            )))
            .into()
        })
    }
}

/// Content-addressed media catalog backed by byte storage and a persistence gateway.
///
/// Construct with [`MediaStore::open`], which hydrates the catalog before
/// returning, so a store is always ready to serve.
///
/// # Example
///
/// ```rust
/// use locker_persistence::InMemoryGateway;
/// use locker_storage::{ContentHasher, InMemoryByteStorage, MediaStore};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MediaStore::open(
///     Arc::new(InMemoryByteStorage::new()),
///     Arc::new(InMemoryGateway::new()),
/// )
/// .await?;
///
/// let item = store.save(b"jpeg bytes", "beach.jpg", "alice").await?;
/// assert_eq!(item.content_hash(), &ContentHasher::digest(b"jpeg bytes"));
/// assert_eq!(store.len().await, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MediaStore {
    storage: Arc<dyn ByteStorage>,
    gateway: Arc<dyn PersistenceGateway>,
    catalog: RwLock<Catalog>,
    events: broadcast::Sender<CatalogEvent>,
}

impl MediaStore {
    /// Open a store and hydrate it from persistence.
    ///
    /// # Errors
    ///
    /// Only gateway I/O failures. Absent or corrupt records hydrate as an empty catalog.
    pub async fn open(
        storage: Arc<dyn ByteStorage>,
        gateway: Arc<dyn PersistenceGateway>,
    ) -> LockerResult<Self> {
        Self::open_with_capacity(storage, gateway, DEFAULT_EVENT_CAPACITY).await
    }

    /// Open a store with a custom event buffer size.
    #[instrument(skip(storage, gateway))]
    pub async fn open_with_capacity(
        storage: Arc<dyn ByteStorage>,
        gateway: Arc<dyn PersistenceGateway>,
        event_capacity: usize,
    ) -> LockerResult<Self> {
        let (events, _) = broadcast::channel(event_capacity.max(1));
        let store = Self {
            storage,
            gateway,
            catalog: RwLock::new(Catalog::default()),
            events,
        };
        store.load_all().await?;
        Ok(store)
    }

    /// Subscribe to catalog change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.events.subscribe()
    }

    /// A file name for uploads that arrive without one, e.g. `media_<uuid>.jpg`.
    pub fn generated_file_name(extension: &str) -> String {
        let extension = extension.trim_start_matches('.');
        if extension.is_empty() {
            format!("media_{}", Uuid::new_v4())
        } else {
            format!("media_{}.{}", Uuid::new_v4(), extension)
        }
    }

    /// Rebuild the catalog from persistence, dropping entries whose content is gone.
    ///
    /// Catalog entries without a metadata record, duplicate or malformed
    /// locators, and metadata records without a catalog entry are dropped as
    /// well. When anything was dropped the cleaned catalog is persisted again.
    #[instrument(skip(self))]
    pub async fn load_all(&self) -> LockerResult<Vec<MediaItem>> {
        let mut catalog = self.catalog.write().await;

        let stored_locators: Vec<String> =
            load_record(self.gateway.as_ref(), keys::MEDIA_CATALOG)
                .await?
                .unwrap_or_default();
        let mut stored_records: HashMap<String, JsonValue> =
            load_record(self.gateway.as_ref(), keys::MEDIA_METADATA)
                .await?
                .unwrap_or_default();

        let mut next = Catalog::default();
        let mut dropped = 0usize;
        let mut seen = HashSet::new();

        for raw in stored_locators {
            let locator = match Locator::parse(&raw) {
                Ok(locator) => locator,
                Err(e) => {
                    warn!(locator = %raw, error = %e, "Dropping malformed catalog entry");
                    dropped += 1;
                    continue;
                }
            };
            if !seen.insert(locator.clone()) {
                warn!(locator = %locator, "Dropping duplicate catalog entry");
                dropped += 1;
                continue;
            }

            let Some(value) = stored_records.remove(locator.as_str()) else {
                warn!(locator = %locator, "Dropping catalog entry without metadata");
                dropped += 1;
                continue;
            };
            let record: MediaRecord = match serde_json::from_value(value) {
                Ok(record) => record,
                Err(e) => {
                    warn!(locator = %locator, error = %e, "Dropping catalog entry with corrupt metadata");
                    dropped += 1;
                    continue;
                }
            };

            match self.storage.exists(&locator).await {
                Ok(true) => {}
                Ok(false) => {
                    info!(locator = %locator, "Pruning catalog entry whose content is gone");
                    dropped += 1;
                    continue;
                }
                Err(e) => {
                    warn!(locator = %locator, error = %e, "Cannot check content, keeping catalog entry");
                }
            }

            next.locators.push(locator.clone());
            next.records.insert(locator, record);
        }

        if !stored_records.is_empty() {
            warn!(
                orphans = stored_records.len(),
                "Dropping metadata records without catalog entries"
            );
            dropped += stored_records.len();
        }

        if dropped > 0 {
            self.persist(&next).await?;
        }

        let items = next.items();
        *catalog = next;
        drop(catalog);

        info!(count = items.len(), dropped, "Loaded media catalog");
        self.notify(CatalogEvent::Reloaded { count: items.len() });
        Ok(items)
    }

    /// Snapshot of the catalog in insertion order.
    pub async fn items(&self) -> Vec<MediaItem> {
        self.catalog.read().await.items()
    }

    /// Item at `index`, if any.
    pub async fn get(&self, index: usize) -> Option<MediaItem> {
        let catalog = self.catalog.read().await;
        catalog
            .locators
            .get(index)
            .and_then(|locator| catalog.item(locator))
    }

    /// Number of items in the catalog.
    pub async fn len(&self) -> usize {
        self.catalog.read().await.locators.len()
    }

    /// Whether the catalog is empty.
    pub async fn is_empty(&self) -> bool {
        self.catalog.read().await.locators.is_empty()
    }

    /// Store `data` and append it to the catalog.
    ///
    /// # Errors
    ///
    /// - `InvalidName` if the file name or uploader is unusable
    /// - `IoFailure` if the bytes could not be written or the catalog not persisted;
    ///   the catalog is unchanged in both cases
    #[instrument(skip(self, data), fields(size = data.len()))]
    pub async fn save(
        &self,
        data: &[u8],
        file_name: &str,
        uploaded_by: &str,
    ) -> LockerResult<MediaItem> {
        if uploaded_by.trim().is_empty() {
            return Err(StorageError::new(StorageErrorKind::InvalidName(
                "uploader identity is empty".to_string(),
            ))
            .into());
        }

        let file_name = file_name.trim();
        let locator = Locator::for_file_name(file_name)?;
        let content_hash = ContentHasher::digest(data);
        let record = MediaRecord {
            file_name: file_name.to_string(),
            size_bytes: data.len() as u64,
            created_at: Utc::now(),
            content_hash,
            uploaded_by: uploaded_by.to_string(),
        };

        let mut catalog = self.catalog.write().await;

        self.storage.write(&locator, data).await?;

        let mut next = catalog.clone();
        next.locators.push(locator.clone());
        next.records.insert(locator.clone(), record.clone());

        if let Err(e) = self.persist(&next).await {
            if let Err(cleanup) = self.storage.remove(&locator).await {
                error!(locator = %locator, error = %cleanup, "Failed to remove content after persistence failure");
            }
            return Err(e);
        }

        *catalog = next;
        drop(catalog);

        info!(
            locator = %locator,
            hash = %record.content_hash,
            uploaded_by,
            "Saved media"
        );
        self.notify(CatalogEvent::Saved {
            locator: locator.clone(),
        });
        Ok(MediaItem::from_record(locator, &record))
    }

    /// Read back the content of the item at `index`.
    ///
    /// # Errors
    ///
    /// `NotFound` for a bad index or missing content, `IoFailure` otherwise
    #[instrument(skip(self))]
    pub async fn read(&self, index: usize) -> LockerResult<Vec<u8>> {
        // Hold the read guard so a concurrent delete cannot pull the bytes mid-read
        let catalog = self.catalog.read().await;
        let locator = catalog.locator_at(index)?;
        self.storage.read(locator).await
    }

    /// Remove the item at `index`, its content and its metadata.
    ///
    /// Later items shift down by one.
    ///
    /// # Errors
    ///
    /// `NotFound` if `index` is out of bounds at call time. `IoFailure` if the
    /// content cannot be removed or the catalog not persisted; the catalog is
    /// unchanged in both cases.
    #[instrument(skip(self))]
    pub async fn delete(&self, index: usize) -> LockerResult<()> {
        let mut catalog = self.catalog.write().await;
        let locator = catalog.locator_at(index)?.clone();

        let mut next = catalog.clone();
        next.locators.remove(index);
        next.records.remove(&locator);

        // Persist first: a crash afterwards leaves an orphaned file, never a
        // catalog entry pointing at nothing
        self.persist(&next).await?;

        match self.storage.remove(&locator).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                warn!(locator = %locator, "Content already gone, removing catalog entry");
            }
            Err(e) => {
                if let Err(restore) = self.persist(&catalog).await {
                    error!(locator = %locator, error = %restore, "Failed to restore catalog after remove failure");
                }
                return Err(e);
            }
        }

        *catalog = next;
        drop(catalog);

        info!(locator = %locator, index, "Deleted media");
        self.notify(CatalogEvent::Deleted { locator });
        Ok(())
    }

    /// Rename the item at `index`, moving its content to a fresh locator.
    ///
    /// The old extension is kept when `new_name` does not already end with it.
    /// The item keeps its position, size, timestamp, uploader and hash.
    ///
    /// # Errors
    ///
    /// `NotFound` for a bad index, `InvalidName` for an unusable name,
    /// `IoFailure` if the move or persistence fails. On error the item is
    /// exactly as before the call.
    #[instrument(skip(self))]
    pub async fn rename(&self, index: usize, new_name: &str) -> LockerResult<MediaItem> {
        let mut catalog = self.catalog.write().await;
        let old_locator = catalog.locator_at(index)?.clone();

        if new_name.trim().is_empty() {
            return Err(StorageError::new(StorageErrorKind::InvalidName(
                "new name is empty".to_string(),
            ))
            .into());
        }
        let final_name = renamed_file_name(old_locator.extension(), new_name);
        let new_locator = Locator::for_file_name(&final_name)?;

        let mut record = catalog
            .records
            .get(&old_locator)
            .cloned()
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(old_locator.to_string())))?;
        record.file_name = final_name;

        self.storage.move_content(&old_locator, &new_locator).await?;

        let mut next = catalog.clone();
        next.locators[index] = new_locator.clone();
        next.records.remove(&old_locator);
        next.records.insert(new_locator.clone(), record.clone());

        if let Err(e) = self.persist(&next).await {
            if let Err(undo) = self.storage.move_content(&new_locator, &old_locator).await {
                error!(
                    from = %new_locator,
                    to = %old_locator,
                    error = %undo,
                    "Failed to move content back after persistence failure"
                );
            }
            return Err(e);
        }

        *catalog = next;
        drop(catalog);

        info!(from = %old_locator, to = %new_locator, "Renamed media");
        self.notify(CatalogEvent::Renamed {
            from: old_locator,
            to: new_locator.clone(),
        });
        Ok(MediaItem::from_record(new_locator, &record))
    }

    /// Stored hash of `item`, bare lowercase hex.
    ///
    /// `None` if the item is no longer in the catalog.
    pub async fn get_hash(&self, item: &MediaItem) -> Option<String> {
        self.catalog
            .read()
            .await
            .records
            .get(item.locator())
            .map(|record| record.content_hash.clone())
    }

    /// Overwrite the stored hash tag of `item`. The content is not touched.
    ///
    /// A leading `#` in `new_hash` is ignored.
    ///
    /// # Errors
    ///
    /// `NotFound` if the item is no longer in the catalog, `IoFailure` if the
    /// catalog cannot be persisted.
    #[instrument(skip(self, item), fields(locator = %item.locator()))]
    pub async fn update_hash(&self, item: &MediaItem, new_hash: &str) -> LockerResult<()> {
        let mut catalog = self.catalog.write().await;
        let locator = item.locator();

        let mut next = catalog.clone();
        let record = next
            .records
            .get_mut(locator)
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(locator.to_string())))?;
        record.content_hash = ContentHasher::normalize(new_hash);

        self.persist(&next).await?;
        *catalog = next;
        drop(catalog);

        debug!("Updated hash tag");
        self.notify(CatalogEvent::HashUpdated {
            locator: locator.clone(),
        });
        Ok(())
    }

    /// Every item whose content hash matches `hash` (bare or `#`-prefixed).
    pub async fn find_by_hash(&self, hash: &str) -> Vec<MediaItem> {
        let wanted = ContentHasher::normalize(hash);
        self.catalog
            .read()
            .await
            .items()
            .into_iter()
            .filter(|item| item.content_hash() == &wanted)
            .collect()
    }

    /// Push buffered gateway state to durable storage.
    #[instrument(skip(self))]
    pub async fn flush(&self) -> LockerResult<()> {
        // Wait out any in-flight mutation
        let _catalog = self.catalog.read().await;
        self.gateway.flush().await
    }

    /// Persist the catalog and its metadata as one batch.
    async fn persist(&self, catalog: &Catalog) -> LockerResult<()> {
        let locators: Vec<&str> = catalog.locators.iter().map(Locator::as_str).collect();
        let records: BTreeMap<&str, &MediaRecord> = catalog
            .records
            .iter()
            .map(|(locator, record)| (locator.as_str(), record))
            .collect();

        self.gateway
            .set_many(vec![
                to_record(keys::MEDIA_CATALOG, &locators)?,
                to_record(keys::MEDIA_METADATA, &records)?,
            ])
            .await
            .inspect_err(|e| error!(error = %e, "Failed to persist media catalog"))
    }

    fn notify(&self, event: CatalogEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryByteStorage;
    use locker_error::LockerErrorKind;
    use locker_persistence::InMemoryGateway;

    async fn store() -> (MediaStore, InMemoryByteStorage, InMemoryGateway) {
        let storage = InMemoryByteStorage::new();
        let gateway = InMemoryGateway::new();
        let store = MediaStore::open(Arc::new(storage.clone()), Arc::new(gateway.clone()))
            .await
            .unwrap();
        (store, storage, gateway)
    }

    #[tokio::test]
    async fn test_open_empty() {
        let (store, _, gateway) = store().await;
        assert!(store.is_empty().await);
        // Nothing was dropped, so nothing was written
        assert!(gateway.is_empty().await);
    }

    #[tokio::test]
    async fn test_save_rejects_empty_uploader() {
        let (store, storage, _) = store().await;
        let err = store.save(b"x", "a.jpg", "  ").await.unwrap_err();
        assert!(!err.is_not_found());
        assert!(storage.is_empty().await);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_generated_file_name() {
        let name = MediaStore::generated_file_name(".jpg");
        assert!(name.starts_with("media_"));
        assert!(name.ends_with(".jpg"));
        assert_ne!(name, MediaStore::generated_file_name("jpg"));
        assert!(!MediaStore::generated_file_name("").contains('.'));
    }

    #[tokio::test]
    async fn test_get_out_of_bounds() {
        let (store, _, _) = store().await;
        store.save(b"x", "a.jpg", "alice").await.unwrap();
        assert!(store.get(0).await.is_some());
        assert!(store.get(1).await.is_none());
        assert!(store.read(1).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_rename_rejects_blank_name() {
        let (store, storage, _) = store().await;
        let original = store.save(b"x", "a.jpg", "alice").await.unwrap();

        for blank in ["", "   "] {
            let err = store.rename(0, blank).await.unwrap_err();
            assert!(matches!(
                err.kind(),
                LockerErrorKind::Storage(StorageError {
                    kind: StorageErrorKind::InvalidName(_),
                    ..
                })
            ));
        }

        assert_eq!(store.get(0).await.unwrap(), original);
        assert!(storage.exists(original.locator()).await.unwrap());
    }
}
