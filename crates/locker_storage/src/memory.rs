//! In-memory implementation of ByteStorage for testing.

use crate::{ByteStorage, Locator};
use locker_error::{LockerResult, StorageError, StorageErrorKind};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory byte storage.
///
/// Stores content in a HashMap protected by an RwLock. Clones share the same
/// map, so tests can remove content "externally" behind a store's back.
#[derive(Debug, Clone, Default)]
pub struct InMemoryByteStorage {
    blobs: Arc<RwLock<HashMap<Locator, Vec<u8>>>>,
}

impl InMemoryByteStorage {
    /// Create a new empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored blobs (for testing).
    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    /// Check if the storage is empty (for testing).
    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl ByteStorage for InMemoryByteStorage {
    async fn write(&self, locator: &Locator, data: &[u8]) -> LockerResult<()> {
        self.blobs
            .write()
            .await
            .insert(locator.clone(), data.to_vec());
        Ok(())
    }

    async fn read(&self, locator: &Locator) -> LockerResult<Vec<u8>> {
        self.blobs
            .read()
            .await
            .get(locator)
            .cloned()
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(locator.to_string())).into())
    }

    async fn remove(&self, locator: &Locator) -> LockerResult<()> {
        self.blobs
            .write()
            .await
            .remove(locator)
            .map(|_| ())
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(locator.to_string())).into())
    }

    async fn move_content(&self, from: &Locator, to: &Locator) -> LockerResult<()> {
        let mut blobs = self.blobs.write().await;
        let data = blobs
            .remove(from)
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(from.to_string())))?;
        blobs.insert(to.clone(), data);
        Ok(())
    }

    async fn exists(&self, locator: &Locator) -> LockerResult<bool> {
        Ok(self.blobs.read().await.contains_key(locator))
    }
}
