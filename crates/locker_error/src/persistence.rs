//! Persistence gateway error types.

/// Kinds of persistence errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PersistenceErrorKind {
    /// Reading or writing the backing state failed
    #[display("Persistence I/O failure: {}", _0)]
    Io(String),
    /// A persisted record exists but does not parse into the expected shape
    #[display("Corrupt record '{}': {}", key, reason)]
    Corrupt {
        /// Key of the unreadable record
        key: String,
        /// Parser message
        reason: String,
    },
    /// A value could not be serialized for storage
    #[display("Failed to serialize '{}': {}", key, reason)]
    Serialization {
        /// Key being written
        key: String,
        /// Serializer message
        reason: String,
    },
}

/// Persistence error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Persistence Error: {} at line {} in {}", kind, line, file)]
pub struct PersistenceError {
    /// The kind of error that occurred
    pub kind: PersistenceErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PersistenceError {
    /// Create a new persistence error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PersistenceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PersistenceErrorKind {
        &self.kind
    }

    /// Whether this error reports an unparseable record.
    pub fn is_corrupt(&self) -> bool {
        matches!(self.kind, PersistenceErrorKind::Corrupt { .. })
    }
}
