//! Mutual interaction graph for Locker.
//!
//! Users who have interacted with each other (viewed each other's uploads,
//! exchanged a reaction) are linked in a symmetric relation. Private
//! messaging is only allowed between users linked in both directions.
//!
//! # Example
//!
//! ```rust
//! use locker_persistence::InMemoryGateway;
//! use locker_social::InteractionGraph;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let graph = InteractionGraph::open(Arc::new(InMemoryGateway::new())).await?;
//!
//! graph.register("alice", "bob").await?;
//! assert!(graph.can_message("bob", "alice").await);
//! assert!(!graph.can_message("alice", "carol").await);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod event;
mod graph;

pub use event::RelationEvent;
pub use graph::{DEFAULT_EVENT_CAPACITY, InteractionGraph};

// Re-export error types from locker_error
pub use locker_error::{InteractionError, InteractionErrorKind};
