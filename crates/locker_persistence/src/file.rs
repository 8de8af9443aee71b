//! JSON file persistence backend.
//!
//! All records live in a single JSON object on disk. Every write rewrites the
//! whole document through a temp file + rename so a crash mid-write leaves
//! either the old document or the new one, never a torn file.

use crate::PersistenceGateway;
use async_trait::async_trait;
use locker_error::{LockerResult, PersistenceError, PersistenceErrorKind};
use serde_json::{Map, Value as JsonValue};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Gateway persisting records to one JSON file.
#[derive(Debug)]
pub struct JsonFileGateway {
    path: PathBuf,
    records: RwLock<Map<String, JsonValue>>,
}

impl JsonFileGateway {
    /// Open the state file at `path`, creating its parent directory.
    ///
    /// A missing file starts an empty gateway. A file that is not a JSON
    /// object is logged and treated as empty; it is replaced on the next write.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or the file cannot be read.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub async fn open(path: impl AsRef<Path>) -> LockerResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                PersistenceError::new(PersistenceErrorKind::Io(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let records = match tokio::fs::read(&path).await {
            Ok(bytes) => Self::parse_document(&path, &bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No state file yet, starting empty");
                Map::new()
            }
            Err(e) => {
                return Err(PersistenceError::new(PersistenceErrorKind::Io(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
                .into());
            }
        };

        info!(records = records.len(), "Opened JSON state file");
        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    /// Location of the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_document(path: &Path, bytes: &[u8]) -> Map<String, JsonValue> {
        match serde_json::from_slice::<JsonValue>(bytes) {
            Ok(JsonValue::Object(map)) => map,
            Ok(other) => {
                warn!(
                    path = %path.display(),
                    found = %json_type(&other),
                    "State file is not a JSON object, starting empty"
                );
                Map::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "State file is corrupt, starting empty");
                Map::new()
            }
        }
    }

    /// Write the full document atomically.
    async fn write_document(&self, records: &Map<String, JsonValue>) -> LockerResult<()> {
        let bytes = serde_json::to_vec_pretty(records).map_err(|e| {
            PersistenceError::new(PersistenceErrorKind::Serialization {
                key: "*".to_string(),
                reason: e.to_string(),
            })
        })?;

        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &bytes).await.map_err(|e| {
            PersistenceError::new(PersistenceErrorKind::Io(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &self.path).await.map_err(|e| {
            PersistenceError::new(PersistenceErrorKind::Io(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            )))
        })?;

        debug!(path = %self.path.display(), size = bytes.len(), "Wrote state file");
        Ok(())
    }
}

fn json_type(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[async_trait]
impl PersistenceGateway for JsonFileGateway {
    async fn get(&self, key: &str) -> LockerResult<Option<JsonValue>> {
        Ok(self.records.read().await.get(key).cloned())
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    async fn set(&self, key: &str, value: JsonValue) -> LockerResult<()> {
        self.set_many(vec![(key.to_string(), value)]).await
    }

    #[instrument(skip(self, entries), fields(path = %self.path.display(), count = entries.len()))]
    async fn set_many(&self, entries: Vec<(String, JsonValue)>) -> LockerResult<()> {
        let mut records = self.records.write().await;

        // The cached document only changes once the file write succeeded
        let mut next = records.clone();
        next.extend(entries);
        self.write_document(&next).await?;
        *records = next;

        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn flush(&self) -> LockerResult<()> {
        // Hold the lock so no rename races the sync
        let _records = self.records.read().await;

        match tokio::fs::File::open(&self.path).await {
            Ok(file) => file.sync_all().await.map_err(|e| {
                PersistenceError::new(PersistenceErrorKind::Io(format!(
                    "sync {}: {}",
                    self.path.display(),
                    e
                )))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Nothing written yet, nothing to flush");
                return Ok(());
            }
            Err(e) => {
                return Err(PersistenceError::new(PersistenceErrorKind::Io(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
                .into());
            }
        }

        info!("Flushed state file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state.json");

        let gateway = JsonFileGateway::open(&path).await.unwrap();
        gateway
            .set_many(vec![
                ("mediaCatalog".to_string(), json!(["a/one.jpg"])),
                ("interactions".to_string(), json!({"alice": ["bob"]})),
            ])
            .await
            .unwrap();
        gateway.flush().await.unwrap();
        drop(gateway);

        let reopened = JsonFileGateway::open(&path).await.unwrap();
        assert_eq!(
            reopened.get("mediaCatalog").await.unwrap(),
            Some(json!(["a/one.jpg"]))
        );
        assert_eq!(
            reopened.get("interactions").await.unwrap(),
            Some(json!({"alice": ["bob"]}))
        );
    }

    #[tokio::test]
    async fn test_corrupt_file_starts_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        let gateway = JsonFileGateway::open(&path).await.unwrap();
        assert!(gateway.get("mediaCatalog").await.unwrap().is_none());

        // The next write replaces the corrupt document
        gateway.set("mediaCatalog", json!([])).await.unwrap();
        let reopened = JsonFileGateway::open(&path).await.unwrap();
        assert_eq!(reopened.get("mediaCatalog").await.unwrap(), Some(json!([])));
    }

    #[tokio::test]
    async fn test_non_object_document_starts_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("state.json");
        tokio::fs::write(&path, b"[1, 2, 3]").await.unwrap();

        let gateway = JsonFileGateway::open(&path).await.unwrap();
        assert!(gateway.get("interactions").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_flush_before_any_write() {
        let temp = TempDir::new().unwrap();
        let gateway = JsonFileGateway::open(temp.path().join("nested/state.json"))
            .await
            .unwrap();
        gateway.flush().await.unwrap();
    }
}
