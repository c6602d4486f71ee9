//! Event pusher trait.
//!
//! Abstracts delivery of outbound frames to connected clients. The usecase
//! layer depends on this trait; the WebSocket-backed implementation lives in
//! the infrastructure layer.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::error::PushError;
use super::value_object::ConnectionId;

/// Signal delivered to a connection's outbound loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushSignal {
    /// A serialized frame to forward to the client.
    Frame(String),
    /// Close the connection from the server side (forced kick).
    Close,
}

/// Per-connection outbound channel.
pub type PusherChannel = mpsc::UnboundedSender<PushSignal>;

/// Outbound event delivery to connected clients.
///
/// Sends are fire-and-forget from the session logic's perspective: a
/// delivery failure to one connection must not abort delivery to others.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventPusher: Send + Sync {
    /// Register the outbound channel for a new connection.
    async fn register_channel(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// Remove the outbound channel for a closed connection.
    async fn unregister_channel(&self, connection_id: &ConnectionId);

    /// Push one frame to one specific connection (private delivery).
    async fn push_to(&self, connection_id: &ConnectionId, frame: &str) -> Result<(), PushError>;

    /// Push one frame to each target; individual failures are tolerated.
    async fn broadcast(&self, targets: Vec<ConnectionId>, frame: &str) -> Result<(), PushError>;

    /// Force-close a connection (best-effort) and drop its channel.
    async fn close(&self, connection_id: &ConnectionId);
}
