//! UseCase error types.
//!
//! Everything here is recovered locally: a failed usecase logs and moves
//! on. None of these errors terminates a connection or the process, and
//! `Denied` / `InvalidCommand` deliberately produce no response to the
//! peer (minimal-disclosure policy).

use thiserror::Error;

/// Connection establishment failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("connection '{0}' is already registered")]
    DuplicateConnection(String),
}

/// Name declaration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclareNameError {
    /// Empty or whitespace-only name; the caller may retry.
    #[error("declared name is empty")]
    InvalidName,

    /// The connection vanished mid-declaration (race with disconnect).
    #[error("connection '{0}' is no longer registered")]
    NotConnected(String),

    /// A second declaration on the same connection; names are set-once.
    #[error("connection '{0}' already declared a name")]
    AlreadyDeclared(String),
}

/// Unauthorized privileged action. Silent no-op toward the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("caller '{0}' is not an admin")]
pub struct Denied(pub String);

/// Malformed admin command payload. Silent no-op toward the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid admin command: {0}")]
pub struct InvalidCommand(pub String);
