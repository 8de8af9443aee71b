//! Typed helpers over the untyped gateway.

use crate::PersistenceGateway;
use locker_error::{LockerResult, PersistenceError, PersistenceErrorKind};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::warn;

/// Load and deserialize the record stored under `key`.
///
/// A record that is present but does not parse into `T` is logged and
/// reported as absent, so startup never fails on corrupt state. Only
/// gateway I/O failures are returned as errors.
pub async fn load_record<T>(gateway: &dyn PersistenceGateway, key: &str) -> LockerResult<Option<T>>
where
    T: DeserializeOwned,
{
    let Some(value) = gateway.get(key).await? else {
        return Ok(None);
    };

    match serde_json::from_value(value) {
        Ok(record) => Ok(Some(record)),
        Err(e) => {
            let error = PersistenceError::new(PersistenceErrorKind::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            });
            warn!(key, error = %error, "Ignoring corrupt persisted record");
            Ok(None)
        }
    }
}

/// Serialize `record` for storage under `key`.
pub fn to_record<T>(key: &str, record: &T) -> LockerResult<(String, JsonValue)>
where
    T: Serialize + ?Sized,
{
    let value = serde_json::to_value(record).map_err(|e| {
        PersistenceError::new(PersistenceErrorKind::Serialization {
            key: key.to_string(),
            reason: e.to_string(),
        })
    })?;
    Ok((key.to_string(), value))
}
