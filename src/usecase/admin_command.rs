//! UseCase: admin command processing.
//!
//! Four privileged commands, each behind the authorization guard:
//! `get_users`, `kick_user`, `change_user_color`, `refresh_all_chat`.
//! Denied callers and malformed payloads are silent no-ops toward the
//! peer; they are logged and nothing else happens.

use std::sync::Arc;

use crate::domain::{
    ColorCode, ConnectionId, EventPusher, SessionRegistry, SystemNotification,
};
use crate::infrastructure::dto::websocket::{AdminUserEntry, ServerEvent};

use super::authorize::AuthorizationGuard;
use super::error::InvalidCommand;

/// A parsed, well-formed admin command.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminCommand {
    GetUsers,
    KickUser { target: ConnectionId },
    ChangeUserColor { target: ConnectionId, color: String },
    ClearChat,
}

impl AdminCommand {
    /// Parse the wire payload `{type, target_sid?, color?}`.
    ///
    /// Unknown command kinds and missing required fields are rejected as
    /// `InvalidCommand`.
    pub fn parse(
        command_type: &str,
        target_sid: Option<String>,
        color: Option<String>,
    ) -> Result<Self, InvalidCommand> {
        let target = |sid: Option<String>| -> Result<ConnectionId, InvalidCommand> {
            let sid = sid.ok_or_else(|| {
                InvalidCommand(format!("'{}' requires a target_sid", command_type))
            })?;
            ConnectionId::new(sid).map_err(|e| InvalidCommand(e.to_string()))
        };

        match command_type {
            "get_users" => Ok(Self::GetUsers),
            "kick_user" => Ok(Self::KickUser {
                target: target(target_sid)?,
            }),
            "change_user_color" => Ok(Self::ChangeUserColor {
                target: target(target_sid)?,
                color: color.ok_or_else(|| {
                    InvalidCommand("'change_user_color' requires a color".to_string())
                })?,
            }),
            "refresh_all_chat" => Ok(Self::ClearChat),
            unknown => Err(InvalidCommand(format!("unknown command '{}'", unknown))),
        }
    }
}

pub struct AdminCommandUseCase {
    registry: Arc<dyn SessionRegistry>,
    pusher: Arc<dyn EventPusher>,
    guard: AuthorizationGuard,
}

impl AdminCommandUseCase {
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        pusher: Arc<dyn EventPusher>,
        guard: AuthorizationGuard,
    ) -> Self {
        Self {
            registry,
            pusher,
            guard,
        }
    }

    /// Execute one admin command on behalf of `caller`.
    ///
    /// An unauthorized caller gets nothing back: no error frame, no
    /// broadcast, no state change.
    pub async fn execute(&self, caller: &ConnectionId, command: AdminCommand) {
        if self.guard.authorize(caller).await.is_err() {
            tracing::debug!(
                "Denied admin command from non-admin connection '{}'",
                caller
            );
            return;
        }

        match command {
            AdminCommand::GetUsers => self.get_users(caller).await,
            AdminCommand::KickUser { target } => self.kick_user(&target).await,
            AdminCommand::ChangeUserColor { target, color } => {
                self.change_user_color(&target, color).await
            }
            AdminCommand::ClearChat => self.clear_chat().await,
        }
    }

    /// Private listing of every participant except the requester.
    async fn get_users(&self, caller: &ConnectionId) {
        let users: Vec<AdminUserEntry> = self
            .registry
            .snapshot()
            .await
            .iter()
            .filter(|p| &p.connection_id != caller)
            .map(AdminUserEntry::from)
            .collect();

        let frame = serde_json::to_string(&ServerEvent::AdminUsersList { users }).unwrap();
        if let Err(e) = self.pusher.push_to(caller, &frame).await {
            tracing::warn!("Failed to push user list to '{}': {}", caller, e);
        }
    }

    /// Forcibly disconnect a participant.
    ///
    /// Order matters: the registry removal happens before the transport
    /// close, so a message the target sends during teardown hits the
    /// lookup-miss no-op instead of being delivered.
    async fn kick_user(&self, target: &ConnectionId) {
        let Some(removed) = self.registry.remove(target).await else {
            tracing::debug!("Kick target '{}' not found, ignoring", target);
            return;
        };

        self.pusher.close(target).await;

        let name = removed.name_or_id().to_string();
        tracing::info!("Kicked '{}' ('{}')", target, name);

        let frame =
            serde_json::to_string(&ServerEvent::from(SystemNotification::UserKicked { name }))
                .unwrap();
        self.broadcast_to_all(&frame).await;
    }

    /// Change a participant's display color.
    ///
    /// Subsequent messages from the target carry the new color; messages
    /// already delivered are not touched.
    async fn change_user_color(&self, target: &ConnectionId, color: String) {
        let color = match ColorCode::new(color) {
            Ok(color) => color,
            Err(e) => {
                tracing::warn!("Rejected color change for '{}': {}", target, e);
                return;
            }
        };

        if self.registry.set_color(target, color.clone()).await.is_err() {
            tracing::debug!("Color change target '{}' not found, ignoring", target);
            return;
        }

        let frame = serde_json::to_string(&ServerEvent::from(SystemNotification::ColorChanged {
            connection_id: target.clone(),
            color,
        }))
        .unwrap();
        self.broadcast_to_all(&frame).await;
    }

    /// Wipe the shared message view.
    ///
    /// Purely a display instruction; no server-side state mutates, so
    /// repeating it is idempotent.
    async fn clear_chat(&self) {
        let frame =
            serde_json::to_string(&ServerEvent::from(SystemNotification::ChatCleared)).unwrap();
        self.broadcast_to_all(&frame).await;
    }

    async fn broadcast_to_all(&self, frame: &str) {
        let targets: Vec<ConnectionId> = self
            .registry
            .snapshot()
            .await
            .into_iter()
            .map(|p| p.connection_id)
            .collect();
        self.pusher
            .broadcast(targets, frame)
            .await
            .unwrap_or_else(|e| tracing::warn!("Failed to broadcast: {}", e));
    }
}
