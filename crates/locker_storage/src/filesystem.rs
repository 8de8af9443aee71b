//! Filesystem-based byte storage implementation.
//!
//! Each locator maps to one file below the base directory:
//! `{base_path}/{uuid}/{file name}`.

use crate::{ByteStorage, Locator};
use locker_error::{LockerResult, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};

/// Filesystem storage backend.
///
/// # Example Structure
///
/// ```text
/// ~/.local/share/locker/media/
/// ├── 3f2a9c.../
/// │   └── beach.jpg
/// └── 81bd07.../
///     └── media_1c9e....mov
/// ```
///
/// # Features
///
/// - **Atomic writes**: Uses temp file + rename so readers never see partial content
/// - **One directory per locator**: identical display names never collide
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    base_path: PathBuf,
}

impl FileSystemStorage {
    /// Create a new filesystem storage backend.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or accessed.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> LockerResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::IoFailure(format!(
                "create {}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem storage");
        Ok(Self { base_path })
    }

    /// Root directory of the stored content.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get the filesystem path for a locator.
    pub fn path_for(&self, locator: &Locator) -> PathBuf {
        locator
            .as_str()
            .split('/')
            .fold(self.base_path.clone(), |path, segment| path.join(segment))
    }

    async fn ensure_parent(path: &Path) -> LockerResult<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::IoFailure(format!(
                    "create {}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }
        Ok(())
    }

    /// Remove the per-locator directory once it is empty.
    async fn prune_parent(&self, path: &Path) {
        if let Some(parent) = path.parent()
            && parent != self.base_path
            && let Err(e) = tokio::fs::remove_dir(parent).await
        {
            tracing::debug!(path = %parent.display(), error = %e, "Left locator directory in place");
        }
    }

    fn map_io(locator: &Locator, action: &str, e: std::io::Error) -> StorageError {
        if e.kind() == std::io::ErrorKind::NotFound {
            StorageError::new(StorageErrorKind::NotFound(locator.to_string()))
        } else {
            StorageError::new(StorageErrorKind::IoFailure(format!(
                "{} {}: {}",
                action, locator, e
            )))
        }
    }
}

#[async_trait::async_trait]
impl ByteStorage for FileSystemStorage {
    #[tracing::instrument(skip(self, data), fields(locator = %locator, size = data.len()))]
    async fn write(&self, locator: &Locator, data: &[u8]) -> LockerResult<()> {
        let path = self.path_for(locator);
        Self::ensure_parent(&path).await?;

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::IoFailure(format!(
                "write {}: {}",
                temp_path.display(),
                e
            )))
        })?;

        if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(StorageError::new(StorageErrorKind::IoFailure(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
            .into());
        }

        tracing::debug!(path = %path.display(), "Wrote media file");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(locator = %locator))]
    async fn read(&self, locator: &Locator) -> LockerResult<Vec<u8>> {
        let path = self.path_for(locator);
        let data = tokio::fs::read(&path)
            .await
            .map_err(|e| Self::map_io(locator, "read", e))?;

        tracing::debug!(path = %path.display(), size = data.len(), "Read media file");
        Ok(data)
    }

    #[tracing::instrument(skip(self), fields(locator = %locator))]
    async fn remove(&self, locator: &Locator) -> LockerResult<()> {
        let path = self.path_for(locator);
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| Self::map_io(locator, "remove", e))?;
        self.prune_parent(&path).await;

        tracing::debug!(path = %path.display(), "Removed media file");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(from = %from, to = %to))]
    async fn move_content(&self, from: &Locator, to: &Locator) -> LockerResult<()> {
        let from_path = self.path_for(from);
        let to_path = self.path_for(to);

        if !self.exists(from).await? {
            return Err(StorageError::new(StorageErrorKind::NotFound(from.to_string())).into());
        }

        Self::ensure_parent(&to_path).await?;
        if let Err(e) = tokio::fs::rename(&from_path, &to_path).await {
            self.prune_parent(&to_path).await;
            return Err(Self::map_io(from, "move", e).into());
        }
        self.prune_parent(&from_path).await;

        tracing::debug!(
            from = %from_path.display(),
            to = %to_path.display(),
            "Moved media file"
        );
        Ok(())
    }

    async fn exists(&self, locator: &Locator) -> LockerResult<bool> {
        tokio::fs::try_exists(self.path_for(locator))
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::IoFailure(format!(
                    "stat {}: {}",
                    locator, e
                )))
                .into()
            })
    }
}
