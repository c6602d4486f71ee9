//! UseCase: participant disconnection.
//!
//! Disconnect is an implicit, idempotent "remove + broadcast left". When it
//! races with a kick for the same connection, whichever removal runs second
//! finds nothing and emits nothing.

use std::sync::Arc;

use crate::domain::{ConnectionId, EventPusher, SessionRegistry, SystemNotification};
use crate::infrastructure::dto::websocket::ServerEvent;

pub struct DisconnectParticipantUseCase {
    registry: Arc<dyn SessionRegistry>,
    pusher: Arc<dyn EventPusher>,
}

impl DisconnectParticipantUseCase {
    pub fn new(registry: Arc<dyn SessionRegistry>, pusher: Arc<dyn EventPusher>) -> Self {
        Self { registry, pusher }
    }

    /// Tear down a connection's session state.
    pub async fn execute(&self, connection_id: &ConnectionId) {
        self.pusher.unregister_channel(connection_id).await;

        let Some(removed) = self.registry.remove(connection_id).await else {
            // already gone: disconnect raced a kick, nothing left to do
            tracing::debug!("Connection '{}' already removed", connection_id);
            return;
        };
        tracing::info!("Connection '{}' disconnected and removed", connection_id);

        // an unnamed participant never joined publicly, so nobody is told
        let Some(name) = removed.display_name else {
            return;
        };

        let left = ServerEvent::from(SystemNotification::Left {
            name: name.into_string(),
        });
        let frame = serde_json::to_string(&left).unwrap();
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
            .unwrap_or_else(|e| tracing::warn!("Failed to broadcast leave notice: {}", e));
    }
}
