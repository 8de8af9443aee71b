//! Media catalog command handlers.

use super::commands::OutputFormat;
use locker::{Locker, LockerResult, MediaItem, MediaStore, StorageError, StorageErrorKind};
use std::path::Path;

/// Upload a file from disk.
pub async fn upload(
    locker: &Locker,
    path: &Path,
    uploaded_by: &str,
    name: Option<&str>,
) -> LockerResult<()> {
    let data = tokio::fs::read(path).await.map_err(|e| {
        StorageError::new(StorageErrorKind::IoFailure(format!(
            "read {}: {}",
            path.display(),
            e
        )))
    })?;

    let file_name = match name {
        Some(name) => name.to_string(),
        None => path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| {
                let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
                MediaStore::generated_file_name(extension)
            }),
    };

    let item = locker.media().save(&data, &file_name, uploaded_by).await?;
    let index = locker.media().len().await.saturating_sub(1);
    println!("[{}] {}", index, describe(&item));
    Ok(())
}

/// Print the catalog.
pub async fn list(locker: &Locker, format: OutputFormat) -> LockerResult<()> {
    let items = locker.media().items().await;

    match format {
        OutputFormat::Json => {
            let rows: Vec<_> = items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    serde_json::json!({
                        "index": index,
                        "locator": item.locator().as_str(),
                        "fileName": item.file_name(),
                        "kind": item.kind().as_str(),
                        "sizeBytes": item.size_bytes(),
                        "createdAt": item.created_at().to_rfc3339(),
                        "contentHash": item.content_hash(),
                        "uploadedBy": item.uploaded_by(),
                    })
                })
                .collect();
            println!("{}", serde_json::Value::Array(rows));
        }
        OutputFormat::Human => {
            for (index, item) in items.iter().enumerate() {
                println!("[{}] {}", index, describe(item));
            }
            println!("Total: {} items", items.len());
        }
    }

    Ok(())
}

/// Delete the item at `index`.
pub async fn delete(locker: &Locker, index: usize) -> LockerResult<()> {
    locker.media().delete(index).await?;
    println!("Deleted item {}", index);
    Ok(())
}

/// Rename the item at `index`.
pub async fn rename(locker: &Locker, index: usize, new_name: &str) -> LockerResult<()> {
    let item = locker.media().rename(index, new_name).await?;
    println!("[{}] {}", index, describe(&item));
    Ok(())
}

/// Show or overwrite the hash tag of the item at `index`.
pub async fn hash(locker: &Locker, index: usize, set: Option<&str>) -> LockerResult<()> {
    let item = locker.media().get(index).await.ok_or_else(|| {
        StorageError::new(StorageErrorKind::NotFound(format!("index {}", index)))
    })?;

    if let Some(new_hash) = set {
        locker.media().update_hash(&item, new_hash).await?;
    }

    match locker.media().get_hash(&item).await {
        Some(hash) => println!("#{}", hash),
        None => println!("(no hash recorded)"),
    }
    Ok(())
}

/// Record a view and report the resulting link.
pub async fn view(locker: &Locker, viewer: &str, index: usize) -> LockerResult<()> {
    let item = locker.record_view(viewer, index).await?;
    println!("{} viewed {} by {}", viewer, item.file_name(), item.uploaded_by());
    Ok(())
}

fn describe(item: &MediaItem) -> String {
    format!(
        "{} ({}, {} KiB) by {} {}",
        item.file_name(),
        item.kind(),
        item.size_kib(),
        item.uploaded_by(),
        item.hash_tag()
    )
}
