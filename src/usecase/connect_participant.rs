//! UseCase: connection establishment.
//!
//! Creates the participant record and wires the outbound channel, then
//! tells the client its own connection id. The record stays unnamed until
//! the client declares an identity.

use std::sync::Arc;

use crate::common::time::Clock;
use crate::domain::{ConnectionId, EventPusher, PusherChannel, SessionRegistry, Timestamp};
use crate::infrastructure::dto::websocket::ServerEvent;

use super::error::ConnectError;

pub struct ConnectParticipantUseCase {
    registry: Arc<dyn SessionRegistry>,
    pusher: Arc<dyn EventPusher>,
    clock: Arc<dyn Clock>,
}

impl ConnectParticipantUseCase {
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        pusher: Arc<dyn EventPusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            pusher,
            clock,
        }
    }

    /// Register a new connection.
    ///
    /// # Arguments
    ///
    /// * `connection_id` - Transport-assigned id for the new connection
    /// * `sender` - Outbound channel for pushing frames to this client
    ///
    /// # Returns
    ///
    /// * `Ok(Timestamp)` - Connection registered; the bootstrap `connected`
    ///   frame has been queued for the client
    /// * `Err(ConnectError)` - The id is already registered
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<Timestamp, ConnectError> {
        let connected_at = Timestamp::new(self.clock.now_millis());

        self.registry
            .register(connection_id.clone(), connected_at)
            .await
            .map_err(|_| ConnectError::DuplicateConnection(connection_id.as_str().to_string()))?;

        self.pusher
            .register_channel(connection_id.clone(), sender)
            .await;

        // tell the client its own sid so it can filter itself out of admin
        // listings
        let connected = ServerEvent::Connected {
            sid: connection_id.as_str().to_string(),
        };
        let frame = serde_json::to_string(&connected).unwrap();
        if let Err(e) = self.pusher.push_to(&connection_id, &frame).await {
            tracing::warn!("Failed to push connected frame to '{}': {}", connection_id, e);
        }

        Ok(connected_at)
    }
}
