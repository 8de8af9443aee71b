//! Error types for the Locker media store.
//!
//! This crate provides the foundation error types used throughout the Locker workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use locker_error::{LockerResult, StorageError, StorageErrorKind};
//!
//! fn remove_media() -> LockerResult<()> {
//!     Err(StorageError::new(StorageErrorKind::NotFound("index 4".to_string())))?
//! }
//!
//! let err = remove_media().unwrap_err();
//! assert!(err.is_not_found());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod credential;
mod error;
mod interaction;
mod persistence;
mod storage;

pub use config::ConfigError;
pub use credential::{CredentialError, CredentialErrorKind};
pub use error::{LockerError, LockerErrorKind, LockerResult};
pub use interaction::{InteractionError, InteractionErrorKind};
pub use persistence::{PersistenceError, PersistenceErrorKind};
pub use storage::{StorageError, StorageErrorKind};
