//! Conversion logic between domain entities and wire frames.

use crate::domain::{ChatMessage, Participant, SystemNotification};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// Domain Entity → Frame
// ========================================

impl From<ChatMessage> for dto::ServerEvent {
    fn from(message: ChatMessage) -> Self {
        Self::NewMessage {
            sender_name: message.sender_name.into_string(),
            color: message.color.into_string(),
            is_admin_message: message.is_admin_message,
            message_text: message.text,
            timestamp: message.client_timestamp,
        }
    }
}

impl From<SystemNotification> for dto::ServerEvent {
    fn from(notification: SystemNotification) -> Self {
        match notification {
            SystemNotification::Joined { name } => Self::UserJoined { name },
            SystemNotification::Left { name } => Self::UserLeft { name },
            SystemNotification::AdminGranted => Self::AdminStatus { is_admin: true },
            SystemNotification::UserKicked { name } => Self::SystemMessage {
                message: format!("{} has been kicked by an admin.", name),
                r#type: "admin-message".to_string(),
            },
            SystemNotification::ColorChanged {
                connection_id,
                color,
            } => Self::UserColorUpdated {
                sid: connection_id.into_string(),
                color: color.into_string(),
            },
            SystemNotification::ChatCleared => Self::ClearChatDisplay {},
        }
    }
}

impl From<&Participant> for dto::AdminUserEntry {
    fn from(participant: &Participant) -> Self {
        Self {
            sid: participant.connection_id.as_str().to_string(),
            name: participant.name_or_id().to_string(),
            color: participant.color.as_str().to_string(),
        }
    }
}
