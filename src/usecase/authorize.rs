//! Authorization guard for privileged commands.

use std::sync::Arc;

use crate::domain::{ConnectionId, SessionRegistry};

use super::error::Denied;

/// Gates every privileged command on the caller's admin flag.
///
/// A `Denied` result is a silent no-op toward the caller: nothing is pushed
/// back, so a non-admin client cannot probe which actions exist versus
/// which are permitted.
pub struct AuthorizationGuard {
    registry: Arc<dyn SessionRegistry>,
}

impl AuthorizationGuard {
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// `Ok` iff the caller is registered and holds the admin flag.
    pub async fn authorize(&self, connection_id: &ConnectionId) -> Result<(), Denied> {
        match self.registry.lookup(connection_id).await {
            Some(participant) if participant.is_admin => Ok(()),
            _ => Err(Denied(connection_id.as_str().to_string())),
        }
    }
}
