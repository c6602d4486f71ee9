//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::domain::SessionRegistry;
use crate::usecase::{
    AdminCommandUseCase, ConnectParticipantUseCase, DeclareNameUseCase,
    DisconnectParticipantUseCase, SendMessageUseCase,
};

use super::{
    handler::{
        http::{debug_session, health_check},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Moderated chat session server
///
/// Encapsulates the wired usecases and runs the axum application.
pub struct Server {
    connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    declare_name_usecase: Arc<DeclareNameUseCase>,
    send_message_usecase: Arc<SendMessageUseCase>,
    admin_command_usecase: Arc<AdminCommandUseCase>,
    disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    registry: Arc<dyn SessionRegistry>,
}

impl Server {
    pub fn new(
        connect_participant_usecase: Arc<ConnectParticipantUseCase>,
        declare_name_usecase: Arc<DeclareNameUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        admin_command_usecase: Arc<AdminCommandUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
        registry: Arc<dyn SessionRegistry>,
    ) -> Self {
        Self {
            connect_participant_usecase,
            declare_name_usecase,
            send_message_usecase,
            admin_command_usecase,
            disconnect_participant_usecase,
            registry,
        }
    }

    /// Build the axum router over the shared state.
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_participant_usecase: self.connect_participant_usecase,
            declare_name_usecase: self.declare_name_usecase,
            send_message_usecase: self.send_message_usecase,
            admin_command_usecase: self.admin_command_usecase,
            disconnect_participant_usecase: self.disconnect_participant_usecase,
            registry: self.registry,
        });

        Router::new()
            // WebSocket endpoint
            .route("/ws", get(websocket_handler))
            // HTTP endpoints
            .route("/api/health", get(health_check))
            .route("/debug/session", get(debug_session))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the chat session server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Chat session server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
