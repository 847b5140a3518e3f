//! WebSocket connection handler

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use serde::Serialize;
use tokio::sync::broadcast;

use super::messages::{ClientMessage, LaggedMessage, PongMessage, WelcomeMessage};
use crate::api::state::AppState;

/// WebSocket upgrade handler
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an individual WebSocket connection
async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    // Subscribe before the welcome so nothing published after it is missed
    let mut rx = state.broadcaster.subscribe();
    tracing::info!(
        subscribers = state.broadcaster.subscriber_count(),
        "client connected"
    );

    let welcome = WelcomeMessage::new(state.broadcaster.current_sequence_id());
    if send_json(&mut socket, &welcome).await {
        loop {
            tokio::select! {
                result = rx.recv() => {
                    match result {
                        Ok(msg) => {
                            if !send_json(&mut socket, &msg).await {
                                break;
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            tracing::warn!(missed = n, "client lagged behind broadcast");
                            if !send_json(&mut socket, &LaggedMessage::new(n)).await {
                                break;
                            }
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }

                result = socket.recv() => {
                    match result {
                        Some(Ok(msg)) => {
                            if !handle_client_message(msg, &mut socket).await {
                                break;
                            }
                        }
                        Some(Err(_)) | None => break,
                    }
                }
            }
        }
    }

    tracing::info!("client disconnected");
}

/// Serialize and send; false once the client is gone
async fn send_json<T: Serialize>(socket: &mut WebSocket, value: &T) -> bool {
    match serde_json::to_string(value) {
        Ok(json) => socket.send(Message::Text(json)).await.is_ok(),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode websocket frame");
            true
        }
    }
}

/// Handle a message from the client
/// Returns false if the connection should be closed
async fn handle_client_message(msg: Message, socket: &mut WebSocket) -> bool {
    match msg {
        Message::Text(text) => {
            match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::Ping) => send_json(socket, &PongMessage::default()).await,
                Err(_) => {
                    tracing::debug!(frame = %text, "ignoring unknown client frame");
                    true
                }
            }
        }
        Message::Binary(_) => true,
        Message::Ping(data) => socket.send(Message::Pong(data)).await.is_ok(),
        Message::Pong(_) => true,
        Message::Close(_) => false,
    }
}
