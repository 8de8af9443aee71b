//! Durable key-value persistence for Locker.
//!
//! The media store and the interaction graph keep their state in memory and
//! mirror it through a [`PersistenceGateway`] after every mutation. The gateway
//! has no business logic of its own: it stores JSON values under string keys.
//!
//! # Backends
//!
//! - [`JsonFileGateway`]: a single JSON document on disk, rewritten atomically
//! - [`InMemoryGateway`]: a shared `HashMap`, for tests and ephemeral sessions
//!
//! # Example
//!
//! ```rust
//! use locker_persistence::{InMemoryGateway, PersistenceGateway, keys};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = InMemoryGateway::new();
//! gateway.set(keys::MEDIA_CATALOG, json!(["a/photo.jpg"])).await?;
//!
//! let catalog = gateway.get(keys::MEDIA_CATALOG).await?;
//! assert_eq!(catalog, Some(json!(["a/photo.jpg"])));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod file;
mod gateway;
pub mod keys;
mod memory;
mod record;

pub use file::JsonFileGateway;
pub use gateway::PersistenceGateway;
pub use locker_error::{PersistenceError, PersistenceErrorKind};
pub use memory::InMemoryGateway;
pub use record::{load_record, to_record};
