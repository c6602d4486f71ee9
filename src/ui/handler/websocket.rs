//! WebSocket connection handler.
//!
//! One task per connection services that connection's inbound frames in
//! order (per-sender ordering comes from this); a second task forwards
//! outbound pushes to the socket and reacts to the forced-close signal.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::domain::{ConnectionId, PushSignal};
use crate::infrastructure::dto::websocket::ClientEvent;
use crate::usecase::AdminCommand;

use super::super::state::AppState;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // the transport assigns the connection id; clients never pick their own
    let connection_id = ConnectionId::generate();
    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id))
}

/// Spawns a task that forwards pushed signals to the WebSocket sender.
///
/// A `Frame` is forwarded as a text message; `Close` sends a close frame
/// and ends the loop, which tears the whole connection down.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<PushSignal>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(signal) = rx.recv().await {
            match signal {
                PushSignal::Frame(frame) => {
                    if sender.send(Message::Text(frame.into())).await.is_err() {
                        break;
                    }
                }
                PushSignal::Close => {
                    // best-effort: the peer may already be gone
                    let _ = sender.send(Message::Close(None)).await;
                    break;
                }
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: ConnectionId) {
    // Register only after the protocol switch succeeded: a record exists
    // exactly when this task, and therefore the teardown below, runs.
    let (tx, rx) = mpsc::unbounded_channel();
    if let Err(e) = state
        .connect_participant_usecase
        .execute(connection_id.clone(), tx)
        .await
    {
        // uuid collisions do not happen in practice, but the registry
        // contract still surfaces the case
        tracing::warn!("Failed to register connection '{}': {}", connection_id, e);
        return;
    }
    tracing::info!("Connection '{}' registered", connection_id);

    let (sender, mut receiver) = socket.split();

    let connection_id_clone = connection_id.clone();
    let state_clone = state.clone();

    // Task receiving frames from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    dispatch_frame(&state_clone, &connection_id_clone, text.as_str()).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // Task pushing frames from the session logic to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // implicit, idempotent teardown; a no-op when a kick already removed us
    state
        .disconnect_participant_usecase
        .execute(&connection_id)
        .await;
}

/// Parse one inbound frame and dispatch it to the matching usecase.
///
/// Malformed frames are logged and ignored; nothing here is ever fatal to
/// the connection.
async fn dispatch_frame(state: &Arc<AppState>, connection_id: &ConnectionId, text: &str) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(
                "Ignoring malformed frame from '{}': {}",
                connection_id,
                e
            );
            return;
        }
    };

    match event {
        ClientEvent::SetName { name } => {
            if let Err(e) = state
                .declare_name_usecase
                .execute(connection_id, name)
                .await
            {
                tracing::warn!("Name declaration from '{}' rejected: {}", connection_id, e);
            }
        }
        ClientEvent::Message { message, timestamp } => {
            state
                .send_message_usecase
                .execute(connection_id, message, timestamp)
                .await;
        }
        ClientEvent::AdminCommand {
            command_type,
            target_sid,
            color,
        } => match AdminCommand::parse(&command_type, target_sid, color) {
            Ok(command) => {
                state
                    .admin_command_usecase
                    .execute(connection_id, command)
                    .await;
            }
            Err(e) => {
                // silent toward the peer, logged for operators
                tracing::warn!("Ignoring admin command from '{}': {}", connection_id, e);
            }
        },
    }
}
