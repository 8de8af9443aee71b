//! Locker: a personal media locker.
//!
//! Users upload images and videos; Locker stores the bytes, tags each item
//! with a SHA-256 content hash, and keeps an ordered catalog with uploader,
//! size and timestamp. A symmetric interaction relation between users gates
//! private messaging.
//!
//! This crate ties the workspace together:
//!
//! - [`locker_storage`] - content hashing, byte storage and the [`MediaStore`] catalog
//! - [`locker_social`] - the [`InteractionGraph`]
//! - [`locker_security`] - password hashing and policy
//! - [`locker_persistence`] - durable key-value records
//!
//! # Example
//!
//! ```no_run
//! use locker::{Locker, LockerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let locker = Locker::open(LockerConfig::load()?).await?;
//! locker.media().save(b"frames", "clip.mov", "bob").await?;
//! locker.interactions().register("alice", "bob").await?;
//! assert!(locker.interactions().can_message("bob", "alice").await);
//! locker.shutdown().await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod locker;
mod observability;

pub use config::{EventConfig, LockerConfig, PersistenceConfig, StorageConfig};
pub use locker::Locker;
pub use observability::{ObservabilityConfig, init_observability};

// Re-export the workspace crates' public API
pub use locker_error::*;
pub use locker_persistence::{
    InMemoryGateway, JsonFileGateway, PersistenceGateway, keys, load_record, to_record,
};
pub use locker_security::{CredentialHasher, PasswordPolicy, PasswordStrength};
pub use locker_social::{InteractionGraph, RelationEvent};
pub use locker_storage::{
    ByteStorage, CatalogEvent, ContentHasher, FileSystemStorage, InMemoryByteStorage, Locator,
    MediaItem, MediaKind, MediaRecord, MediaStore,
};
