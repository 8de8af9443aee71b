//! The symmetric interaction relation.

use crate::RelationEvent;
use locker_error::{InteractionError, InteractionErrorKind, LockerResult};
use locker_persistence::{PersistenceGateway, keys, load_record, to_record};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};
use tracing::{debug, info, instrument, warn};

/// Default buffer for relation change notifications.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

type Relation = BTreeMap<String, BTreeSet<String>>;

/// Owns the "has-interacted-with" relation between user identifiers.
///
/// Registration inserts both directions in one step under the write lock, so
/// readers never observe a half-applied link. The full relation is persisted
/// before the new state becomes visible.
#[derive(Debug)]
pub struct InteractionGraph {
    gateway: Arc<dyn PersistenceGateway>,
    relation: RwLock<Relation>,
    events: broadcast::Sender<RelationEvent>,
}

impl InteractionGraph {
    /// Open the graph and hydrate it from persistence.
    ///
    /// # Errors
    ///
    /// Only gateway I/O failures. Absent or corrupt records hydrate as an empty relation.
    pub async fn open(gateway: Arc<dyn PersistenceGateway>) -> LockerResult<Self> {
        Self::open_with_capacity(gateway, DEFAULT_EVENT_CAPACITY).await
    }

    /// Open the graph with a custom event buffer size.
    #[instrument(skip(gateway))]
    pub async fn open_with_capacity(
        gateway: Arc<dyn PersistenceGateway>,
        event_capacity: usize,
    ) -> LockerResult<Self> {
        let (events, _) = broadcast::channel(event_capacity.max(1));
        let graph = Self {
            gateway,
            relation: RwLock::new(Relation::new()),
            events,
        };
        graph.load_all().await?;
        Ok(graph)
    }

    /// Subscribe to relation change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<RelationEvent> {
        self.events.subscribe()
    }

    /// Replace the in-memory relation with the persisted one.
    #[instrument(skip(self))]
    pub async fn load_all(&self) -> LockerResult<()> {
        let mut relation = self.relation.write().await;

        let stored: BTreeMap<String, Vec<String>> =
            load_record(self.gateway.as_ref(), keys::INTERACTIONS)
                .await?
                .unwrap_or_default();

        let next: Relation = stored
            .into_iter()
            .filter(|(user, _)| !user.trim().is_empty())
            .map(|(user, others)| {
                let others = others
                    .into_iter()
                    .filter(|other| !other.trim().is_empty() && *other != user)
                    .collect();
                (user, others)
            })
            .collect();

        let one_sided = next
            .iter()
            .flat_map(|(user, others)| others.iter().map(move |other| (user, other)))
            .filter(|(user, other)| !next.get(*other).is_some_and(|set| set.contains(*user)))
            .count();
        if one_sided > 0 {
            warn!(one_sided, "Interaction relation has one-sided links");
        }

        let users = next.len();
        *relation = next;
        drop(relation);

        info!(users, "Loaded interaction relation");
        let _ = self.events.send(RelationEvent::Reloaded { users });
        Ok(())
    }

    /// Record that `first` and `second` have interacted.
    ///
    /// Idempotent: registering an existing link changes nothing and writes nothing.
    ///
    /// # Errors
    ///
    /// - `EmptyIdentifier` if either identifier is blank
    /// - `SelfInteraction` if both identifiers are the same
    /// - `Io` if the relation cannot be persisted; the relation is unchanged
    #[instrument(skip(self))]
    pub async fn register(&self, first: &str, second: &str) -> LockerResult<()> {
        let first = first.trim();
        let second = second.trim();
        if first.is_empty() || second.is_empty() {
            return Err(InteractionError::new(InteractionErrorKind::EmptyIdentifier).into());
        }
        if first == second {
            return Err(InteractionError::new(InteractionErrorKind::SelfInteraction(
                first.to_string(),
            ))
            .into());
        }

        let mut relation = self.relation.write().await;
        if linked(&relation, first, second) {
            debug!("Users already linked");
            return Ok(());
        }

        let mut next = relation.clone();
        next.entry(first.to_string())
            .or_default()
            .insert(second.to_string());
        next.entry(second.to_string())
            .or_default()
            .insert(first.to_string());

        self.gateway
            .set_many(vec![to_record(keys::INTERACTIONS, &next)?])
            .await?;
        *relation = next;
        drop(relation);

        info!("Linked users");
        let _ = self.events.send(RelationEvent::Linked {
            first: first.to_string(),
            second: second.to_string(),
        });
        Ok(())
    }

    /// Whether `first` and `second` may message each other.
    ///
    /// Requires the link in both directions.
    pub async fn can_message(&self, first: &str, second: &str) -> bool {
        linked(&*self.relation.read().await, first.trim(), second.trim())
    }

    /// Everyone `user` has interacted with, sorted.
    pub async fn interactions_of(&self, user: &str) -> Vec<String> {
        self.relation
            .read()
            .await
            .get(user.trim())
            .map(|others| others.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of users with at least one interaction.
    pub async fn len(&self) -> usize {
        self.relation.read().await.len()
    }

    /// Whether nobody has interacted yet.
    pub async fn is_empty(&self) -> bool {
        self.relation.read().await.is_empty()
    }

    /// Push buffered gateway state to durable storage.
    pub async fn flush(&self) -> LockerResult<()> {
        let _relation = self.relation.read().await;
        self.gateway.flush().await
    }
}

fn linked(relation: &Relation, first: &str, second: &str) -> bool {
    relation.get(first).is_some_and(|set| set.contains(second))
        && relation.get(second).is_some_and(|set| set.contains(first))
}

#[cfg(test)]
mod tests {
    use super::*;
    use locker_persistence::InMemoryGateway;

    async fn graph() -> (InteractionGraph, InMemoryGateway) {
        let gateway = InMemoryGateway::new();
        let graph = InteractionGraph::open(Arc::new(gateway.clone()))
            .await
            .unwrap();
        (graph, gateway)
    }

    #[tokio::test]
    async fn test_register_is_symmetric() {
        let (graph, _) = graph().await;
        graph.register("alice", "bob").await.unwrap();

        assert!(graph.can_message("alice", "bob").await);
        assert!(graph.can_message("bob", "alice").await);
        assert_eq!(graph.interactions_of("bob").await, vec!["alice"]);
    }

    #[tokio::test]
    async fn test_self_interaction_rejected() {
        let (graph, gateway) = graph().await;
        let err = graph.register("alice", " alice").await.unwrap_err();
        assert!(err.to_string().contains("themselves"));
        assert!(graph.is_empty().await);
        assert!(gateway.is_empty().await);
    }

    #[tokio::test]
    async fn test_empty_identifier_rejected() {
        let (graph, _) = graph().await;
        assert!(graph.register("", "bob").await.is_err());
        assert!(graph.register("alice", "   ").await.is_err());
        assert!(graph.is_empty().await);
    }

    #[tokio::test]
    async fn test_one_sided_link_cannot_message() {
        let gateway = InMemoryGateway::new();
        gateway
            .set(
                keys::INTERACTIONS,
                serde_json::json!({ "alice": ["bob"], "bob": [] }),
            )
            .await
            .unwrap();

        let graph = InteractionGraph::open(Arc::new(gateway)).await.unwrap();
        assert!(!graph.can_message("alice", "bob").await);

        // Registering again repairs the missing direction
        graph.register("bob", "alice").await.unwrap();
        assert!(graph.can_message("alice", "bob").await);
    }
}
