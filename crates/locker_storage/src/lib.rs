//! Content-addressed media storage for Locker.
//!
//! This crate keeps an ordered catalog of media items. Each item's bytes live
//! on pluggable durable storage under a [`Locator`]; its metadata (name, size,
//! timestamp, uploader, SHA-256 tag) lives in a record persisted through a
//! [`PersistenceGateway`](locker_persistence::PersistenceGateway).
//!
//! # Features
//!
//! - **Content hashing**: every save computes a SHA-256 tag of the bytes
//! - **Pluggable backends**: filesystem for real use, in-memory for tests
//! - **Atomic mutations**: catalog and metadata change together or not at all
//! - **Self-healing load**: entries whose content disappeared are pruned on hydration
//!
//! # Example
//!
//! ```rust
//! use locker_persistence::InMemoryGateway;
//! use locker_storage::{FileSystemStorage, MediaStore};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = FileSystemStorage::new("/tmp/locker-media")?;
//! let store = MediaStore::open(Arc::new(storage), Arc::new(InMemoryGateway::new())).await?;
//!
//! let item = store.save(b"frames", "clip.mov", "alice").await?;
//! println!("{} {}", item.file_name(), item.hash_tag());
//!
//! store.rename(0, "holiday").await?;
//! store.delete(0).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod event;
mod filesystem;
mod hasher;
mod item;
mod locator;
mod media_kind;
mod memory;
mod store;

pub use backend::ByteStorage;
pub use event::CatalogEvent;
pub use filesystem::FileSystemStorage;
pub use hasher::ContentHasher;
pub use item::{MediaItem, MediaRecord};
pub use locator::{Locator, renamed_file_name};
pub use media_kind::MediaKind;
pub use memory::InMemoryByteStorage;
pub use store::{DEFAULT_EVENT_CAPACITY, MediaStore};

// Re-export error types from locker_error
pub use locker_error::{StorageError, StorageErrorKind};
