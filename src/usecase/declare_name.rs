//! UseCase: identity declaration and admin assignment.
//!
//! Validates the declared name, stores it, and evaluates the privilege
//! rule. A name is declared at most once per connection. A granted
//! privilege is announced privately to the declaring connection only; the
//! public join notice never reveals admin identity.

use std::sync::Arc;

use crate::domain::{
    ConnectionId, DisplayName, EventPusher, IdentityVerifier, RegistryError, SessionRegistry,
    SystemNotification,
};
use crate::infrastructure::dto::websocket::ServerEvent;

use super::error::DeclareNameError;

pub struct DeclareNameUseCase {
    registry: Arc<dyn SessionRegistry>,
    pusher: Arc<dyn EventPusher>,
    verifier: Arc<dyn IdentityVerifier>,
}

impl DeclareNameUseCase {
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        pusher: Arc<dyn EventPusher>,
        verifier: Arc<dyn IdentityVerifier>,
    ) -> Self {
        Self {
            registry,
            pusher,
            verifier,
        }
    }

    /// Declare a display identity for a connection.
    ///
    /// # Arguments
    ///
    /// * `connection_id` - The declaring connection
    /// * `raw_name` - The declared name, untrimmed
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Name stored; the caller was elevated to admin
    /// * `Ok(false)` - Name stored, no privilege
    /// * `Err(DeclareNameError)` - Empty name, a repeated declaration, or
    ///   the connection vanished
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        raw_name: String,
    ) -> Result<bool, DeclareNameError> {
        let name =
            DisplayName::new(raw_name).map_err(|_| DeclareNameError::InvalidName)?;

        let is_admin = self.verifier.is_admin(&name);

        self.registry
            .set_identity(connection_id, name.clone(), is_admin)
            .await
            .map_err(|e| match e {
                RegistryError::AlreadyNamed(id) => DeclareNameError::AlreadyDeclared(id),
                _ => DeclareNameError::NotConnected(connection_id.as_str().to_string()),
            })?;

        if is_admin {
            // private: broadcasting this would leak the trigger name
            let frame =
                serde_json::to_string(&ServerEvent::from(SystemNotification::AdminGranted))
                    .unwrap();
            if let Err(e) = self.pusher.push_to(connection_id, &frame).await {
                tracing::warn!("Failed to push admin status to '{}': {}", connection_id, e);
            }
            tracing::info!("Connection '{}' elevated to admin", connection_id);
        }

        // public join notice to everyone else
        let joined = ServerEvent::from(SystemNotification::Joined {
            name: name.as_str().to_string(),
        });
        let frame = serde_json::to_string(&joined).unwrap();
        let targets: Vec<ConnectionId> = self
            .registry
            .snapshot()
            .await
            .into_iter()
            .map(|p| p.connection_id)
            .filter(|id| id != connection_id)
            .collect();
        self.pusher
            .broadcast(targets, &frame)
            .await
            .unwrap_or_else(|e| tracing::warn!("Failed to broadcast join notice: {}", e));

        tracing::info!("Connection '{}' declared name '{}'", connection_id, name.as_str());

        Ok(is_admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ADMIN_NAME_TRIGGER, PushSignal, SharedSecretVerifier, Timestamp};
    use crate::infrastructure::{
        event_pusher::WebSocketEventPusher, registry::InMemorySessionRegistry,
    };
    use tokio::sync::mpsc;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    struct Fixture {
        usecase: DeclareNameUseCase,
        registry: Arc<InMemorySessionRegistry>,
        pusher: Arc<WebSocketEventPusher>,
    }

    fn create_fixture() -> Fixture {
        let registry = Arc::new(InMemorySessionRegistry::new());
        let pusher = Arc::new(WebSocketEventPusher::new());
        let verifier = Arc::new(SharedSecretVerifier);
        Fixture {
            usecase: DeclareNameUseCase::new(registry.clone(), pusher.clone(), verifier),
            registry,
            pusher,
        }
    }

    async fn connect(fixture: &Fixture, id: &str) -> UnboundedReceiver<PushSignal> {
        let (tx, rx) = mpsc::unbounded_channel();
        fixture
            .registry
            .register(conn(id), Timestamp::new(0))
            .await
            .unwrap();
        fixture.pusher.register_channel(conn(id), tx).await;
        rx
    }

    fn frame_json(signal: PushSignal) -> serde_json::Value {
        match signal {
            PushSignal::Frame(frame) => serde_json::from_str(&frame).unwrap(),
            PushSignal::Close => panic!("expected a frame, got close"),
        }
    }

    #[tokio::test]
    async fn test_ordinary_name_is_stored_without_privilege() {
        // given:
        let fixture = create_fixture();
        let mut rx = connect(&fixture, "a").await;

        // when:
        let result = fixture.usecase.execute(&conn("a"), "Alice".to_string()).await;

        // then:
        assert_eq!(result, Ok(false));
        let participant = fixture.registry.lookup(&conn("a")).await.unwrap();
        assert_eq!(participant.display_name.unwrap().as_str(), "Alice");
        assert!(!participant.is_admin);
        // no private frame was pushed to the declarer
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected() {
        // given:
        let fixture = create_fixture();
        let _rx = connect(&fixture, "a").await;

        // when:
        let result = fixture.usecase.execute(&conn("a"), "   ".to_string()).await;

        // then:
        assert_eq!(result, Err(DeclareNameError::InvalidName));
        let participant = fixture.registry.lookup(&conn("a")).await.unwrap();
        assert!(participant.display_name.is_none());
    }

    #[tokio::test]
    async fn test_trigger_name_elevates_and_notifies_privately() {
        // given: two connected participants
        let fixture = create_fixture();
        let mut admin_rx = connect(&fixture, "b").await;
        let mut other_rx = connect(&fixture, "a").await;

        // when: b declares the trigger name
        let result = fixture
            .usecase
            .execute(&conn("b"), ADMIN_NAME_TRIGGER.to_string())
            .await;

        // then: b is elevated
        assert_eq!(result, Ok(true));
        assert!(fixture.registry.lookup(&conn("b")).await.unwrap().is_admin);

        // b alone receives the private admin_status frame
        let json = frame_json(admin_rx.recv().await.unwrap());
        assert_eq!(json["event"], "admin_status");
        assert_eq!(json["is_admin"], true);

        // a only sees the public join notice, which does not mention admin
        let json = frame_json(other_rx.recv().await.unwrap());
        assert_eq!(json["event"], "user_joined");
        assert!(other_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_join_notice_reaches_other_participants_only() {
        // given:
        let fixture = create_fixture();
        let mut alice_rx = connect(&fixture, "a").await;
        let mut bob_rx = connect(&fixture, "b").await;

        // when:
        fixture
            .usecase
            .execute(&conn("a"), "Alice".to_string())
            .await
            .unwrap();

        // then:
        let json = frame_json(bob_rx.recv().await.unwrap());
        assert_eq!(json["event"], "user_joined");
        assert_eq!(json["name"], "Alice");
        assert!(alice_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_second_declaration_is_rejected() {
        // given: a named participant and one bystander
        let fixture = create_fixture();
        let mut alice_rx = connect(&fixture, "a").await;
        let mut bob_rx = connect(&fixture, "b").await;
        fixture
            .usecase
            .execute(&conn("a"), "Alice".to_string())
            .await
            .unwrap();
        let _ = bob_rx.recv().await; // Alice's join notice

        // when: the same connection declares again, with the trigger name
        let result = fixture
            .usecase
            .execute(&conn("a"), ADMIN_NAME_TRIGGER.to_string())
            .await;

        // then: rejected, no rename and no late elevation
        assert_eq!(
            result,
            Err(DeclareNameError::AlreadyDeclared("a".to_string()))
        );
        let participant = fixture.registry.lookup(&conn("a")).await.unwrap();
        assert_eq!(participant.display_name.unwrap().as_str(), "Alice");
        assert!(!participant.is_admin);

        // no admin_status to the declarer, no second join notice to anyone
        assert!(alice_rx.try_recv().is_err());
        assert!(bob_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_declaring_for_unknown_connection_fails() {
        // given: nothing registered
        let fixture = create_fixture();

        // when:
        let result = fixture
            .usecase
            .execute(&conn("ghost"), "Alice".to_string())
            .await;

        // then:
        assert_eq!(
            result,
            Err(DeclareNameError::NotConnected("ghost".to_string()))
        );
    }
}
