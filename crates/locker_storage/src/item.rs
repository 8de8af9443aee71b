//! Media item and metadata record types.

use crate::{Locator, MediaKind};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Persisted metadata for one stored asset, keyed by locator.
///
/// Field names are camelCase on disk to match the `mediaMetadata` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRecord {
    /// Display name
    pub file_name: String,
    /// Size of the content at creation time
    pub size_bytes: u64,
    /// When the item was saved
    pub created_at: DateTime<Utc>,
    /// Lowercase hex SHA-256 of the content
    pub content_hash: String,
    /// Identity of the uploader
    pub uploaded_by: String,
}

/// A stored media asset: its locator joined with its metadata record.
///
/// Items are snapshots. Mutations go through [`MediaStore`](crate::MediaStore),
/// which hands out fresh items afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct MediaItem {
    /// Where the bytes live
    locator: Locator,
    /// Display name
    file_name: String,
    /// Size of the content at creation time
    size_bytes: u64,
    /// When the item was saved
    created_at: DateTime<Utc>,
    /// Lowercase hex SHA-256 of the content
    content_hash: String,
    /// Identity of the uploader
    uploaded_by: String,
}

impl MediaItem {
    /// Join a locator with its metadata record.
    pub fn from_record(locator: Locator, record: &MediaRecord) -> Self {
        Self {
            locator,
            file_name: record.file_name.clone(),
            size_bytes: record.size_bytes,
            created_at: record.created_at,
            content_hash: record.content_hash.clone(),
            uploaded_by: record.uploaded_by.clone(),
        }
    }

    /// Content hash rendered as a tag, e.g. `#ba7816bf…`.
    pub fn hash_tag(&self) -> String {
        format!("#{}", self.content_hash)
    }

    /// Kind of media, from the file name extension.
    pub fn kind(&self) -> MediaKind {
        MediaKind::from_file_name(&self.file_name)
    }

    /// Size in whole kibibytes, as shown in listings.
    pub fn size_kib(&self) -> u64 {
        self.size_bytes / 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> MediaRecord {
        MediaRecord {
            file_name: "beach.png".to_string(),
            size_bytes: 4096,
            created_at: Utc::now(),
            content_hash: "abc123".to_string(),
            uploaded_by: "alice".to_string(),
        }
    }

    #[test]
    fn test_item_reflects_record() {
        let locator = Locator::for_file_name("beach.png").unwrap();
        let item = MediaItem::from_record(locator.clone(), &record());

        assert_eq!(item.locator(), &locator);
        assert_eq!(item.hash_tag(), "#abc123");
        assert_eq!(item.kind(), MediaKind::Image);
        assert_eq!(item.size_kib(), 4);
        assert_eq!(item.uploaded_by(), "alice");
    }

    #[test]
    fn test_record_uses_camel_case_fields() {
        let value = serde_json::to_value(record()).unwrap();
        let object = value.as_object().unwrap();
        for field in ["fileName", "sizeBytes", "createdAt", "contentHash", "uploadedBy"] {
            assert!(object.contains_key(field), "missing {}", field);
        }

        let parsed: MediaRecord = serde_json::from_value(json!({
            "fileName": "x.mov",
            "sizeBytes": 1,
            "createdAt": "2025-05-01T12:00:00Z",
            "contentHash": "ff",
            "uploadedBy": "bob"
        }))
        .unwrap();
        assert_eq!(parsed.uploaded_by, "bob");
    }
}
