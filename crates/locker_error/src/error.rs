//! Top-level error wrapper types.

use crate::{
    ConfigError, CredentialError, InteractionError, PersistenceError, PersistenceErrorKind,
    StorageError, StorageErrorKind,
};

/// The union of every error a Locker operation can surface.
///
/// # Examples
///
/// ```
/// use locker_error::{LockerError, StorageError, StorageErrorKind};
///
/// let storage_err = StorageError::new(StorageErrorKind::IoFailure("disk full".to_string()));
/// let err: LockerError = storage_err.into();
/// assert!(format!("{}", err).contains("Storage Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum LockerErrorKind {
    /// Byte storage or catalog error
    #[from(StorageError)]
    Storage(StorageError),
    /// Key-value persistence error
    #[from(PersistenceError)]
    Persistence(PersistenceError),
    /// Interaction graph error
    #[from(InteractionError)]
    Interaction(InteractionError),
    /// Credential policy error
    #[from(CredentialError)]
    Credential(CredentialError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Locker error with kind discrimination.
///
/// # Examples
///
/// ```
/// use locker_error::{ConfigError, LockerResult};
///
/// fn might_fail() -> LockerResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Locker Error: {}", _0)]
pub struct LockerError(Box<LockerErrorKind>);

impl LockerError {
    /// Create a new error from a kind.
    pub fn new(kind: LockerErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &LockerErrorKind {
        &self.0
    }

    /// Whether the error reports a missing index or locator.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.kind(),
            LockerErrorKind::Storage(StorageError {
                kind: StorageErrorKind::NotFound(_),
                ..
            })
        )
    }

    /// Whether the error reports a failed read, write, move or remove.
    pub fn is_io_failure(&self) -> bool {
        matches!(
            self.kind(),
            LockerErrorKind::Storage(StorageError {
                kind: StorageErrorKind::IoFailure(_),
                ..
            }) | LockerErrorKind::Persistence(PersistenceError {
                kind: PersistenceErrorKind::Io(_),
                ..
            })
        )
    }
}

// Generic From implementation for any type that converts to LockerErrorKind
impl<T> From<T> for LockerError
where
    T: Into<LockerErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Locker operations.
pub type LockerResult<T> = std::result::Result<T, LockerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InteractionErrorKind, PersistenceErrorKind};

    #[test]
    fn test_not_found_predicate() {
        let err: LockerError =
            StorageError::new(StorageErrorKind::NotFound("index 2".to_string())).into();
        assert!(err.is_not_found());
        assert!(!err.is_io_failure());
    }

    #[test]
    fn test_io_failure_predicate_covers_persistence() {
        let err: LockerError =
            PersistenceError::new(PersistenceErrorKind::Io("read-only".to_string())).into();
        assert!(err.is_io_failure());

        let corrupt = PersistenceError::new(PersistenceErrorKind::Corrupt {
            key: "mediaCatalog".to_string(),
            reason: "expected array".to_string(),
        });
        assert!(corrupt.is_corrupt());
        assert!(!LockerError::from(corrupt).is_io_failure());
    }

    #[test]
    fn test_location_is_captured() {
        let err = InteractionError::new(InteractionErrorKind::EmptyIdentifier);
        assert!(err.file.ends_with("error.rs"));
        assert!(err.line > 0);
        assert!(format!("{}", err).contains("must not be empty"));
    }
}
