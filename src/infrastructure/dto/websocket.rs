//! WebSocket frame DTOs.
//!
//! Frames are JSON objects tagged by an `event` field. Admin command frames
//! additionally carry a `type` field selecting the command; unknown shapes
//! are rejected by the usecase layer as invalid commands, never fatally.

use serde::{Deserialize, Serialize};

/// Frames received from a client.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Declare a display identity for this connection.
    SetName { name: String },
    /// Broadcast a chat message. The timestamp is client-supplied and used
    /// for display only.
    Message { message: String, timestamp: String },
    /// Privileged command; silently ignored for non-admin callers.
    AdminCommand {
        #[serde(rename = "type")]
        command_type: String,
        #[serde(default)]
        target_sid: Option<String>,
        #[serde(default)]
        color: Option<String>,
    },
}

/// One entry in the private admin user listing.
///
/// Deliberately omits the admin flag so this channel does not reveal other
/// admins' status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminUserEntry {
    pub sid: String,
    pub name: String,
    pub color: String,
}

/// Frames sent to a client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Private bootstrap frame telling the client its own connection id.
    Connected { sid: String },
    /// Private privilege notification; never broadcast.
    AdminStatus { is_admin: bool },
    /// An ordinary chat message, fanned out to every connection.
    NewMessage {
        sender_name: String,
        color: String,
        is_admin_message: bool,
        message_text: String,
        timestamp: String,
    },
    UserJoined {
        name: String,
    },
    UserLeft {
        name: String,
    },
    /// Free-form system notice; `type` selects the display style.
    SystemMessage {
        message: String,
        r#type: String,
    },
    /// Private response to a `get_users` admin command.
    AdminUsersList { users: Vec<AdminUserEntry> },
    /// Instruct every client to wipe its message view.
    ClearChatDisplay {},
    /// Informational; the display layer decides whether to re-render.
    UserColorUpdated { sid: String, color: String },
}
