//! Relation change notifications.

/// Emitted when the interaction relation changes.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RelationEvent {
    /// Two users were linked for the first time
    #[display("linked {} and {}", first, second)]
    Linked {
        /// User passed first to `register`
        first: String,
        /// User passed second to `register`
        second: String,
    },
    /// The relation was rebuilt from persistence
    #[display("reloaded {} users", users)]
    Reloaded {
        /// Users with at least one interaction
        users: usize,
    },
}
