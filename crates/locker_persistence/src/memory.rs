//! In-memory implementation of PersistenceGateway for testing.
//!
//! Values live in a HashMap protected by an RwLock. Clones share the same map,
//! so a test can hand one clone to a store and inspect the other.

use crate::PersistenceGateway;
use async_trait::async_trait;
use locker_error::LockerResult;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory key-value gateway.
///
/// All data is lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGateway {
    records: Arc<RwLock<HashMap<String, JsonValue>>>,
}

impl InMemoryGateway {
    /// Create a new empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored records (for testing).
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Check if the gateway is empty (for testing).
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Remove a record, simulating external loss of state (for testing).
    pub async fn remove(&self, key: &str) -> Option<JsonValue> {
        self.records.write().await.remove(key)
    }
}

#[async_trait]
impl PersistenceGateway for InMemoryGateway {
    async fn get(&self, key: &str) -> LockerResult<Option<JsonValue>> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: JsonValue) -> LockerResult<()> {
        self.records.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn set_many(&self, entries: Vec<(String, JsonValue)>) -> LockerResult<()> {
        let mut records = self.records.write().await;
        records.extend(entries);
        Ok(())
    }
}
