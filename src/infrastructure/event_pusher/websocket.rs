//! WebSocket-backed `EventPusher` implementation.
//!
//! The UI layer accepts the WebSocket connection and creates the unbounded
//! sender; this implementation owns the map of senders and performs the
//! actual delivery. Frame construction stays in the usecase layer, delivery
//! stays here.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, EventPusher, PushError, PushSignal, PusherChannel};

/// Delivers serialized frames to connected clients over their outbound
/// channels.
#[derive(Default)]
pub struct WebSocketEventPusher {
    /// Outbound channel per live connection.
    channels: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketEventPusher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventPusher for WebSocketEventPusher {
    async fn register_channel(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut channels = self.channels.lock().await;
        channels.insert(connection_id.clone(), sender);
        tracing::debug!("Channel for '{}' registered to EventPusher", connection_id);
    }

    async fn unregister_channel(&self, connection_id: &ConnectionId) {
        let mut channels = self.channels.lock().await;
        channels.remove(connection_id);
        tracing::debug!(
            "Channel for '{}' unregistered from EventPusher",
            connection_id
        );
    }

    async fn push_to(&self, connection_id: &ConnectionId, frame: &str) -> Result<(), PushError> {
        let channels = self.channels.lock().await;

        let sender = channels
            .get(connection_id)
            .ok_or_else(|| PushError::ChannelNotFound(connection_id.as_str().to_string()))?;
        sender
            .send(PushSignal::Frame(frame.to_string()))
            .map_err(|e| PushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed frame to '{}'", connection_id);
        Ok(())
    }

    async fn broadcast(&self, targets: Vec<ConnectionId>, frame: &str) -> Result<(), PushError> {
        let channels = self.channels.lock().await;

        for target in targets {
            match channels.get(&target) {
                Some(sender) => {
                    // a failed send to one target must not abort the rest
                    if let Err(e) = sender.send(PushSignal::Frame(frame.to_string())) {
                        tracing::warn!("Failed to push frame to '{}': {}", target, e);
                    }
                }
                None => {
                    tracing::warn!("No channel for '{}' during broadcast, skipping", target);
                }
            }
        }

        Ok(())
    }

    async fn close(&self, connection_id: &ConnectionId) {
        let mut channels = self.channels.lock().await;
        if let Some(sender) = channels.remove(connection_id) {
            // best-effort: the outbound loop sends a Close frame and exits
            if sender.send(PushSignal::Close).is_err() {
                tracing::debug!("Connection '{}' already gone at close", connection_id);
            }
        }
    }
}
