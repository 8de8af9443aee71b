//! Interaction graph error types.

/// Kinds of interaction errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum InteractionErrorKind {
    /// An identifier was empty or whitespace only
    #[display("User identifier must not be empty")]
    EmptyIdentifier,
    /// A user tried to interact with themselves
    #[display("User '{}' cannot interact with themselves", _0)]
    SelfInteraction(String),
}

/// Interaction error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Interaction Error: {} at line {} in {}", kind, line, file)]
pub struct InteractionError {
    /// The kind of error that occurred
    pub kind: InteractionErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl InteractionError {
    /// Create a new interaction error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: InteractionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &InteractionErrorKind {
        &self.kind
    }
}
