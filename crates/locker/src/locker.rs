//! The Locker facade: one media store and one interaction graph sharing a state document.

use crate::LockerConfig;
use locker_error::LockerResult;
use locker_persistence::{JsonFileGateway, PersistenceGateway};
use locker_social::InteractionGraph;
use locker_storage::{ByteStorage, FileSystemStorage, MediaItem, MediaStore};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// A hydrated media locker.
///
/// Lifecycle: [`Locker::open`] constructs and hydrates both stores, the
/// accessors serve requests, and [`Locker::shutdown`] flushes persisted state.
///
/// # Example
///
/// ```no_run
/// use locker::{Locker, LockerConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let locker = Locker::open(LockerConfig::load()?).await?;
///
/// let item = locker.media().save(b"pixels", "cat.png", "alice").await?;
/// println!("{} {}", item.file_name(), item.hash_tag());
///
/// locker.shutdown().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Locker {
    config: LockerConfig,
    media: MediaStore,
    interactions: InteractionGraph,
}

impl Locker {
    /// Open a locker backed by the filesystem locations in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the media root cannot be created or hydration hits an I/O failure.
    #[instrument(skip(config), fields(
        media_root = %config.storage.media_root.display(),
        state_file = %config.persistence.state_file.display()
    ))]
    pub async fn open(config: LockerConfig) -> LockerResult<Self> {
        let storage = FileSystemStorage::new(&config.storage.media_root)?;
        let gateway = JsonFileGateway::open(&config.persistence.state_file).await?;
        Self::with_backends(config, Arc::new(storage), Arc::new(gateway)).await
    }

    /// Open a locker over explicit backends.
    ///
    /// Both stores share `gateway`; their records live under distinct keys.
    pub async fn with_backends(
        config: LockerConfig,
        storage: Arc<dyn ByteStorage>,
        gateway: Arc<dyn PersistenceGateway>,
    ) -> LockerResult<Self> {
        let media =
            MediaStore::open_with_capacity(storage, gateway.clone(), config.events.channel_capacity)
                .await?;
        let interactions =
            InteractionGraph::open_with_capacity(gateway, config.events.channel_capacity).await?;

        info!(
            items = media.len().await,
            users = interactions.len().await,
            "Locker ready"
        );
        Ok(Self {
            config,
            media,
            interactions,
        })
    }

    /// Configuration the locker was opened with.
    pub fn config(&self) -> &LockerConfig {
        &self.config
    }

    /// The media catalog.
    pub fn media(&self) -> &MediaStore {
        &self.media
    }

    /// The interaction relation.
    pub fn interactions(&self) -> &InteractionGraph {
        &self.interactions
    }

    /// Record that `viewer` looked at the item at `index`.
    ///
    /// Links the viewer with the item's uploader. Viewing your own upload is a no-op.
    ///
    /// # Errors
    ///
    /// `NotFound` if there is no item at `index`, plus any error from
    /// [`InteractionGraph::register`].
    #[instrument(skip(self))]
    pub async fn record_view(&self, viewer: &str, index: usize) -> LockerResult<MediaItem> {
        let item = self.media.get(index).await.ok_or_else(|| {
            locker_error::StorageError::new(locker_error::StorageErrorKind::NotFound(format!(
                "index {}",
                index
            )))
        })?;

        if item.uploaded_by().trim() == viewer.trim() {
            debug!("Viewer owns the item");
        } else {
            self.interactions
                .register(viewer, item.uploaded_by())
                .await?;
        }
        Ok(item)
    }

    /// Flush persisted state and release the locker.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> LockerResult<()> {
        self.media.flush().await?;
        self.interactions.flush().await?;
        info!("Locker shut down");
        Ok(())
    }
}
