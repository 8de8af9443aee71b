//! Persistence gateway trait definition.

use async_trait::async_trait;
use locker_error::LockerResult;
use serde_json::Value as JsonValue;

/// Trait for durable key-value storage backends.
///
/// Implementations are pass-through mirrors: they never interpret the values
/// they hold. Callers serialize their state to JSON and write it under one of
/// the [`keys`](crate::keys).
#[async_trait]
pub trait PersistenceGateway: Send + Sync + std::fmt::Debug {
    /// Read the value stored under `key`.
    ///
    /// # Returns
    ///
    /// `None` when nothing has been stored under the key yet
    async fn get(&self, key: &str) -> LockerResult<Option<JsonValue>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: JsonValue) -> LockerResult<()>;

    /// Store several records as one write.
    ///
    /// The default implementation writes the entries one by one. Backends that
    /// can commit several keys at once should override it so related records
    /// (the catalog and its metadata) land together.
    async fn set_many(&self, entries: Vec<(String, JsonValue)>) -> LockerResult<()> {
        for (key, value) in entries {
            self.set(&key, value).await?;
        }
        Ok(())
    }

    /// Push any buffered state to durable storage.
    ///
    /// Called once on shutdown. Backends that write through on every `set`
    /// only need to sync.
    async fn flush(&self) -> LockerResult<()> {
        Ok(())
    }
}
