//! Domain entities for the chat session.

use serde::Serialize;

use super::value_object::{ColorCode, ConnectionId, DisplayName, Timestamp};

/// One connected participant.
///
/// Created at connection establishment with no name, destroyed on
/// disconnect or forced kick. `is_admin` is monotonic: it only ever moves
/// from `false` to `true` while the record exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Participant {
    pub connection_id: ConnectionId,
    /// `None` until the client declares a name (set-once).
    pub display_name: Option<DisplayName>,
    pub color: ColorCode,
    pub is_admin: bool,
    pub connected_at: Timestamp,
}

impl Participant {
    /// Create a fresh, unnamed participant with the fallback color.
    pub fn new(connection_id: ConnectionId, connected_at: Timestamp) -> Self {
        Self {
            connection_id,
            display_name: None,
            color: ColorCode::default(),
            is_admin: false,
            connected_at,
        }
    }

    /// Display name, or the connection id when no name was declared yet.
    pub fn name_or_id(&self) -> &str {
        self.display_name
            .as_ref()
            .map(|n| n.as_str())
            .unwrap_or_else(|| self.connection_id.as_str())
    }
}

/// A chat message in flight.
///
/// Built from the sender's *current* registry record at send time and
/// dropped after the broadcast pass; no history is retained.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub sender_connection_id: ConnectionId,
    pub sender_name: DisplayName,
    pub color: ColorCode,
    pub is_admin_message: bool,
    pub text: String,
    /// Client-supplied, display only; never used for ordering.
    pub client_timestamp: String,
}

/// System notifications emitted by session and moderation operations.
///
/// Name payloads are plain strings: a kicked or leaving participant may
/// never have declared a `DisplayName`, in which case the connection id
/// stands in.
#[derive(Debug, Clone, PartialEq)]
pub enum SystemNotification {
    /// A participant declared a name and joined the session.
    Joined { name: String },
    /// A participant disconnected.
    Left { name: String },
    /// Privilege was granted; delivered privately, never broadcast.
    AdminGranted,
    /// A participant was forcibly disconnected by an admin.
    UserKicked { name: String },
    /// An admin changed a participant's color.
    ColorChanged {
        connection_id: ConnectionId,
        color: ColorCode,
    },
    /// An admin wiped the shared message view.
    ChatCleared,
}
