//! Byte storage trait definition.

use crate::Locator;
use locker_error::LockerResult;

/// Trait for pluggable durable byte storage.
///
/// Implementations only move bytes around. Catalog bookkeeping, hashing and
/// persistence of metadata belong to [`MediaStore`](crate::MediaStore).
#[async_trait::async_trait]
pub trait ByteStorage: Send + Sync + std::fmt::Debug {
    /// Write `data` at `locator`, replacing anything already there.
    ///
    /// # Errors
    ///
    /// `IoFailure` if the bytes could not be written
    async fn write(&self, locator: &Locator, data: &[u8]) -> LockerResult<()>;

    /// Read the bytes stored at `locator`.
    ///
    /// # Errors
    ///
    /// `NotFound` if nothing is stored there, `IoFailure` otherwise
    async fn read(&self, locator: &Locator) -> LockerResult<Vec<u8>>;

    /// Remove the bytes stored at `locator`.
    ///
    /// # Errors
    ///
    /// `NotFound` if nothing is stored there, `IoFailure` otherwise
    async fn remove(&self, locator: &Locator) -> LockerResult<()>;

    /// Move the bytes at `from` to `to`.
    ///
    /// On error nothing has moved.
    async fn move_content(&self, from: &Locator, to: &Locator) -> LockerResult<()>;

    /// Check whether content exists at `locator`.
    ///
    /// # Errors
    ///
    /// `IoFailure` if existence cannot be determined (e.g. permission denied)
    async fn exists(&self, locator: &Locator) -> LockerResult<bool>;
}
