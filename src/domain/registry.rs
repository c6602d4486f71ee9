//! Connection registry trait.
//!
//! The registry is the authoritative mapping of connection id to
//! participant record. The usecase layer depends on this trait; the
//! concrete in-memory implementation lives in the infrastructure layer
//! (dependency inversion).

use async_trait::async_trait;

use super::entity::Participant;
use super::error::RegistryError;
use super::value_object::{ColorCode, ConnectionId, DisplayName, Timestamp};

/// Authoritative participant registry.
///
/// A participant record exists here iff its connection is currently live.
/// Every mutation is atomic with respect to concurrent callers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Register a fresh, unnamed participant for a new connection.
    ///
    /// Fails with `RegistryError::DuplicateConnection` if the id is already
    /// present (should not occur given transport guarantees).
    async fn register(
        &self,
        connection_id: ConnectionId,
        connected_at: Timestamp,
    ) -> Result<(), RegistryError>;

    /// Look up the current record for a connection.
    async fn lookup(&self, connection_id: &ConnectionId) -> Option<Participant>;

    /// Store a declared display name and, when granted, the admin flag.
    ///
    /// The admin flag is monotonic: passing `is_admin = false` never clears
    /// a previously granted privilege.
    async fn set_identity(
        &self,
        connection_id: &ConnectionId,
        name: DisplayName,
        is_admin: bool,
    ) -> Result<(), RegistryError>;

    /// Update a participant's display color.
    async fn set_color(
        &self,
        connection_id: &ConnectionId,
        color: ColorCode,
    ) -> Result<(), RegistryError>;

    /// Remove a participant. Idempotent: returns `None` when already absent.
    async fn remove(&self, connection_id: &ConnectionId) -> Option<Participant>;

    /// All current participants in insertion order.
    async fn snapshot(&self) -> Vec<Participant>;

    /// Number of live connections.
    async fn count(&self) -> usize;
}
