//! Moderated chat session server.
//!
//! Accepts WebSocket connections, relays broadcast chat messages, and
//! processes privileged moderation commands.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server
//! cargo run --bin server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use agora::{
    common::{logger::setup_logger, time::SystemClock},
    domain::SharedSecretVerifier,
    infrastructure::{event_pusher::WebSocketEventPusher, registry::InMemorySessionRegistry},
    ui::Server,
    usecase::{
        AdminCommandUseCase, AuthorizationGuard, ConnectParticipantUseCase, DeclareNameUseCase,
        DisconnectParticipantUseCase, SendMessageUseCase,
    },
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Moderated chat session server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Registry / EventPusher / verifier / clock
    // 2. UseCases
    // 3. Server

    let registry = Arc::new(InMemorySessionRegistry::new());
    let pusher = Arc::new(WebSocketEventPusher::new());
    let verifier = Arc::new(SharedSecretVerifier);
    let clock = Arc::new(SystemClock);

    let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(
        registry.clone(),
        pusher.clone(),
        clock,
    ));
    let declare_name_usecase = Arc::new(DeclareNameUseCase::new(
        registry.clone(),
        pusher.clone(),
        verifier,
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(registry.clone(), pusher.clone()));
    let admin_command_usecase = Arc::new(AdminCommandUseCase::new(
        registry.clone(),
        pusher.clone(),
        AuthorizationGuard::new(registry.clone()),
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        registry.clone(),
        pusher.clone(),
    ));

    let server = Server::new(
        connect_participant_usecase,
        declare_name_usecase,
        send_message_usecase,
        admin_command_usecase,
        disconnect_participant_usecase,
        registry,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
