//! Domain error taxonomy.
//!
//! None of these errors is fatal: every one of them is recovered locally by
//! the usecase layer. Nothing here terminates a connection or the process.

use thiserror::Error;

/// Value object validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("connection id must not be empty")]
    EmptyConnectionId,

    #[error("display name must not be empty or whitespace-only")]
    EmptyDisplayName,

    #[error("'{0}' is not a valid #rrggbb color code")]
    InvalidColorCode(String),
}

/// Errors from the connection registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("connection '{0}' is already registered")]
    DuplicateConnection(String),

    #[error("connection '{0}' is not registered")]
    NotFound(String),

    /// Display names are set-once for a connection's lifetime.
    #[error("connection '{0}' already declared a name")]
    AlreadyNamed(String),
}

/// Errors from the event pusher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PushError {
    #[error("no channel registered for connection '{0}'")]
    ChannelNotFound(String),

    #[error("failed to push event: {0}")]
    PushFailed(String),
}
