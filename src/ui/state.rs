//! Shared application state for the axum router.

use std::sync::Arc;

use crate::domain::SessionRegistry;
use crate::usecase::{
    AdminCommandUseCase, ConnectParticipantUseCase, DeclareNameUseCase,
    DisconnectParticipantUseCase, SendMessageUseCase,
};

/// Shared application state
pub struct AppState {
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    pub declare_name_usecase: Arc<DeclareNameUseCase>,
    pub send_message_usecase: Arc<SendMessageUseCase>,
    pub admin_command_usecase: Arc<AdminCommandUseCase>,
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// Read-only access for the debug endpoint.
    pub registry: Arc<dyn SessionRegistry>,
}
