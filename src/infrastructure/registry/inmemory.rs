//! In-memory `SessionRegistry` implementation.
//!
//! Participant records are held in a `Vec` behind a single mutex: insertion
//! order is what the admin listing wants, the session never grows beyond a
//! handful of participants, and one lock makes every compound mutation
//! (lookup + update, kick's remove step) atomic.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ColorCode, ConnectionId, DisplayName, Participant, RegistryError, SessionRegistry, Timestamp,
};

/// Process-scoped participant registry.
///
/// Empty at process start, torn down at process stop; exposed only through
/// the `SessionRegistry` operations.
#[derive(Default)]
pub struct InMemorySessionRegistry {
    participants: Mutex<Vec<Participant>>,
}

impl InMemorySessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn register(
        &self,
        connection_id: ConnectionId,
        connected_at: Timestamp,
    ) -> Result<(), RegistryError> {
        let mut participants = self.participants.lock().await;
        if participants
            .iter()
            .any(|p| p.connection_id == connection_id)
        {
            return Err(RegistryError::DuplicateConnection(
                connection_id.into_string(),
            ));
        }
        participants.push(Participant::new(connection_id, connected_at));
        Ok(())
    }

    async fn lookup(&self, connection_id: &ConnectionId) -> Option<Participant> {
        let participants = self.participants.lock().await;
        participants
            .iter()
            .find(|p| &p.connection_id == connection_id)
            .cloned()
    }

    async fn set_identity(
        &self,
        connection_id: &ConnectionId,
        name: DisplayName,
        is_admin: bool,
    ) -> Result<(), RegistryError> {
        let mut participants = self.participants.lock().await;
        let participant = participants
            .iter_mut()
            .find(|p| &p.connection_id == connection_id)
            .ok_or_else(|| RegistryError::NotFound(connection_id.as_str().to_string()))?;
        // set-once: renames and late privilege grabs are rejected, which
        // also keeps is_admin monotonic (this is its only writer)
        if participant.display_name.is_some() {
            return Err(RegistryError::AlreadyNamed(
                connection_id.as_str().to_string(),
            ));
        }
        participant.display_name = Some(name);
        participant.is_admin = is_admin;
        Ok(())
    }

    async fn set_color(
        &self,
        connection_id: &ConnectionId,
        color: ColorCode,
    ) -> Result<(), RegistryError> {
        let mut participants = self.participants.lock().await;
        let participant = participants
            .iter_mut()
            .find(|p| &p.connection_id == connection_id)
            .ok_or_else(|| RegistryError::NotFound(connection_id.as_str().to_string()))?;
        participant.color = color;
        Ok(())
    }

    async fn remove(&self, connection_id: &ConnectionId) -> Option<Participant> {
        let mut participants = self.participants.lock().await;
        let index = participants
            .iter()
            .position(|p| &p.connection_id == connection_id)?;
        Some(participants.remove(index))
    }

    async fn snapshot(&self) -> Vec<Participant> {
        let participants = self.participants.lock().await;
        participants.clone()
    }

    async fn count(&self) -> usize {
        let participants = self.participants.lock().await;
        participants.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    fn name(n: &str) -> DisplayName {
        DisplayName::new(n.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_register_and_lookup() {
        // given:
        let registry = InMemorySessionRegistry::new();

        // when:
        registry
            .register(conn("a"), Timestamp::new(1000))
            .await
            .unwrap();
        let found = registry.lookup(&conn("a")).await;

        // then:
        let participant = found.unwrap();
        assert_eq!(participant.connection_id, conn("a"));
        assert!(participant.display_name.is_none());
        assert!(!participant.is_admin);
        assert_eq!(participant.connected_at, Timestamp::new(1000));
    }

    #[tokio::test]
    async fn test_register_duplicate_connection_fails() {
        // given:
        let registry = InMemorySessionRegistry::new();
        registry
            .register(conn("a"), Timestamp::new(1000))
            .await
            .unwrap();

        // when:
        let result = registry.register(conn("a"), Timestamp::new(2000)).await;

        // then:
        assert_eq!(
            result,
            Err(RegistryError::DuplicateConnection("a".to_string()))
        );
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        // given:
        let registry = InMemorySessionRegistry::new();
        registry
            .register(conn("a"), Timestamp::new(1000))
            .await
            .unwrap();

        // when:
        let first = registry.remove(&conn("a")).await;
        let second = registry.remove(&conn("a")).await;

        // then:
        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(registry.count().await, 0);
    }

    #[tokio::test]
    async fn test_snapshot_preserves_insertion_order() {
        // given:
        let registry = InMemorySessionRegistry::new();
        registry
            .register(conn("charlie"), Timestamp::new(1))
            .await
            .unwrap();
        registry
            .register(conn("alice"), Timestamp::new(2))
            .await
            .unwrap();
        registry
            .register(conn("bob"), Timestamp::new(3))
            .await
            .unwrap();

        // when:
        let snapshot = registry.snapshot().await;

        // then: insertion order, not lexicographic
        let ids: Vec<&str> = snapshot.iter().map(|p| p.connection_id.as_str()).collect();
        assert_eq!(ids, vec!["charlie", "alice", "bob"]);
    }

    #[tokio::test]
    async fn test_set_identity_stores_name_and_grant() {
        // given:
        let registry = InMemorySessionRegistry::new();
        registry
            .register(conn("a"), Timestamp::new(1000))
            .await
            .unwrap();

        // when:
        registry
            .set_identity(&conn("a"), name("Alice"), true)
            .await
            .unwrap();

        // then:
        let participant = registry.lookup(&conn("a")).await.unwrap();
        assert_eq!(participant.display_name, Some(name("Alice")));
        assert!(participant.is_admin);
    }

    #[tokio::test]
    async fn test_set_identity_is_set_once() {
        // given: a participant who already declared a name
        let registry = InMemorySessionRegistry::new();
        registry
            .register(conn("a"), Timestamp::new(1000))
            .await
            .unwrap();
        registry
            .set_identity(&conn("a"), name("Alice"), false)
            .await
            .unwrap();

        // when: a second identity write, this time claiming the privilege
        let result = registry.set_identity(&conn("a"), name("Boss"), true).await;

        // then: rejected, and the record keeps its first identity
        assert_eq!(result, Err(RegistryError::AlreadyNamed("a".to_string())));
        let participant = registry.lookup(&conn("a")).await.unwrap();
        assert_eq!(participant.display_name, Some(name("Alice")));
        assert!(!participant.is_admin);
    }

    #[tokio::test]
    async fn test_admin_grant_survives_later_mutations() {
        // given: a participant granted admin at declaration time
        let registry = InMemorySessionRegistry::new();
        registry
            .register(conn("a"), Timestamp::new(1000))
            .await
            .unwrap();
        registry
            .set_identity(&conn("a"), name("Boss"), true)
            .await
            .unwrap();

        // when: the record is mutated through the remaining write paths
        let red = ColorCode::new("#ff0000".to_string()).unwrap();
        registry.set_color(&conn("a"), red).await.unwrap();

        // then: the privilege is not cleared
        let participant = registry.lookup(&conn("a")).await.unwrap();
        assert!(participant.is_admin);
    }

    #[tokio::test]
    async fn test_set_identity_on_unknown_connection_fails() {
        let registry = InMemorySessionRegistry::new();
        let result = registry.set_identity(&conn("ghost"), name("x"), false).await;
        assert_eq!(result, Err(RegistryError::NotFound("ghost".to_string())));
    }

    #[tokio::test]
    async fn test_set_color_updates_record() {
        // given:
        let registry = InMemorySessionRegistry::new();
        registry
            .register(conn("a"), Timestamp::new(1000))
            .await
            .unwrap();

        // when:
        let red = ColorCode::new("#ff0000".to_string()).unwrap();
        registry.set_color(&conn("a"), red.clone()).await.unwrap();

        // then:
        let participant = registry.lookup(&conn("a")).await.unwrap();
        assert_eq!(participant.color, red);
    }
}
