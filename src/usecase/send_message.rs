//! UseCase: chat message broadcast.
//!
//! Builds the outbound frame from the sender's *current* registry record
//! (name, color, admin flag) and fans it out to every connection including
//! the sender. A sender that is no longer registered, or that never
//! declared a name, is a silent no-op.

use std::sync::Arc;

use crate::domain::{ChatMessage, ConnectionId, EventPusher, SessionRegistry};
use crate::infrastructure::dto::websocket::ServerEvent;

pub struct SendMessageUseCase {
    registry: Arc<dyn SessionRegistry>,
    pusher: Arc<dyn EventPusher>,
}

impl SendMessageUseCase {
    pub fn new(registry: Arc<dyn SessionRegistry>, pusher: Arc<dyn EventPusher>) -> Self {
        Self { registry, pusher }
    }

    /// Broadcast one chat message.
    ///
    /// # Arguments
    ///
    /// * `sender_connection_id` - The sending connection
    /// * `text` - Message body
    /// * `client_timestamp` - Client-supplied, display only
    pub async fn execute(
        &self,
        sender_connection_id: &ConnectionId,
        text: String,
        client_timestamp: String,
    ) {
        // lookup miss: race with disconnect or kick, drop the message
        let Some(sender) = self.registry.lookup(sender_connection_id).await else {
            tracing::debug!(
                "Dropping message from unregistered connection '{}'",
                sender_connection_id
            );
            return;
        };

        // a connection that never declared a name has not joined yet
        let Some(sender_name) = sender.display_name else {
            tracing::debug!(
                "Dropping message from unnamed connection '{}'",
                sender_connection_id
            );
            return;
        };

        let message = ChatMessage {
            sender_connection_id: sender.connection_id,
            sender_name,
            color: sender.color,
            is_admin_message: sender.is_admin,
            text,
            client_timestamp,
        };
        let frame = serde_json::to_string(&ServerEvent::from(message)).unwrap();

        // one fan-out pass over the snapshot taken now; includes the sender
        let targets: Vec<ConnectionId> = self
            .registry
            .snapshot()
            .await
            .into_iter()
            .map(|p| p.connection_id)
            .collect();
        self.pusher
            .broadcast(targets, &frame)
            .await
            .unwrap_or_else(|e| tracing::warn!("Failed to broadcast message: {}", e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ColorCode, DisplayName, PushSignal, Timestamp};
    use crate::infrastructure::{
        event_pusher::WebSocketEventPusher, registry::InMemorySessionRegistry,
    };
    use tokio::sync::mpsc;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string()).unwrap()
    }

    struct Fixture {
        usecase: SendMessageUseCase,
        registry: Arc<InMemorySessionRegistry>,
        pusher: Arc<WebSocketEventPusher>,
    }

    fn create_fixture() -> Fixture {
        let registry = Arc::new(InMemorySessionRegistry::new());
        let pusher = Arc::new(WebSocketEventPusher::new());
        Fixture {
            usecase: SendMessageUseCase::new(registry.clone(), pusher.clone()),
            registry,
            pusher,
        }
    }

    async fn join(fixture: &Fixture, id: &str, name: &str) -> UnboundedReceiver<PushSignal> {
        let (tx, rx) = mpsc::unbounded_channel();
        fixture
            .registry
            .register(conn(id), Timestamp::new(0))
            .await
            .unwrap();
        fixture
            .registry
            .set_identity(&conn(id), DisplayName::new(name.to_string()).unwrap(), false)
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
    async fn test_message_reaches_everyone_including_sender() {
        // given:
        let fixture = create_fixture();
        let mut alice_rx = join(&fixture, "a", "Alice").await;
        let mut bob_rx = join(&fixture, "b", "Bob").await;

        // when:
        fixture
            .usecase
            .execute(&conn("a"), "hello".to_string(), "12:00:00".to_string())
            .await;

        // then:
        for rx in [&mut alice_rx, &mut bob_rx] {
            let json = frame_json(rx.recv().await.unwrap());
            assert_eq!(json["event"], "new_message");
            assert_eq!(json["sender_name"], "Alice");
            assert_eq!(json["message_text"], "hello");
            assert_eq!(json["timestamp"], "12:00:00");
            assert_eq!(json["is_admin_message"], false);
        }
    }

    #[tokio::test]
    async fn test_message_from_unregistered_sender_is_dropped() {
        // given:
        let fixture = create_fixture();
        let mut bob_rx = join(&fixture, "b", "Bob").await;

        // when: a stale connection id sends
        fixture
            .usecase
            .execute(&conn("gone"), "hello".to_string(), "12:00:00".to_string())
            .await;

        // then: nothing was delivered
        assert!(bob_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_message_from_unnamed_sender_is_dropped() {
        // given: a registered connection that never declared a name
        let fixture = create_fixture();
        let (tx, _unnamed_rx) = mpsc::unbounded_channel();
        fixture
            .registry
            .register(conn("u"), Timestamp::new(0))
            .await
            .unwrap();
        fixture.pusher.register_channel(conn("u"), tx).await;
        let mut bob_rx = join(&fixture, "b", "Bob").await;

        // when:
        fixture
            .usecase
            .execute(&conn("u"), "hello".to_string(), "12:00:00".to_string())
            .await;

        // then:
        assert!(bob_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_message_carries_current_color() {
        // given: a sender recolored after joining
        let fixture = create_fixture();
        let mut alice_rx = join(&fixture, "a", "Alice").await;
        fixture
            .registry
            .set_color(&conn("a"), ColorCode::new("#ff0000".to_string()).unwrap())
            .await
            .unwrap();

        // when:
        fixture
            .usecase
            .execute(&conn("a"), "hi".to_string(), "12:00:00".to_string())
            .await;

        // then: the frame reflects the current record, not a cached copy
        let json = frame_json(alice_rx.recv().await.unwrap());
        assert_eq!(json["color"], "#ff0000");
    }
}
