//! UseCase layer: one file per session operation.
//!
//! Each usecase is a struct holding its dependencies as trait objects and
//! exposing an async `execute`. The UI layer translates wire frames into
//! usecase calls and never touches the registry or pusher directly.

pub mod admin_command;
pub mod authorize;
pub mod connect_participant;
pub mod declare_name;
pub mod disconnect_participant;
pub mod error;
pub mod send_message;

pub use admin_command::{AdminCommand, AdminCommandUseCase};
pub use authorize::AuthorizationGuard;
pub use connect_participant::ConnectParticipantUseCase;
pub use declare_name::DeclareNameUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{ConnectError, DeclareNameError, Denied, InvalidCommand};
pub use send_message::SendMessageUseCase;
