//! WebSocket handler
//!
//! Accepts upgraded connections and runs each one as a pair of tasks: a
//! reader that processes inbound frames strictly in arrival order, and a
//! writer draining the connection's outbound queue into the socket.

use crate::connection::{Connection, Session};
use crate::handlers::{self, EventDispatcher};
use crate::protocol::{ClientEvent, ServerEvent};
use crate::server::GatewayState;
use axum::{
    extract::{ws::Message, State, WebSocketUpgrade},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Channel buffer size for outgoing events
const EVENT_BUFFER_SIZE: usize = 256;

/// WebSocket gateway handler
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: axum::extract::ws::WebSocket) {
    let session_id = Session::generate_id();

    // Create event channel for outgoing events
    let (tx, mut rx) = mpsc::channel::<ServerEvent>(EVENT_BUFFER_SIZE);

    // Register connection
    let connection = state
        .connection_manager()
        .add_connection(session_id.clone(), tx);

    tracing::info!(
        session_id = %session_id,
        connections = state.connection_manager().connection_count(),
        "WebSocket connection established"
    );

    // Split the WebSocket
    let (mut ws_sink, mut ws_stream) = socket.split();

    // Clone state for the reader task
    let state_recv = state.clone();
    let connection_recv = connection.clone();
    let session_id_recv = session_id.clone();

    // Reader: inbound frames, one at a time, in arrival order
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    handle_text_frame(&state_recv, &connection_recv, &text);
                }
                Ok(Message::Binary(_)) => {
                    tracing::debug!(
                        session_id = %session_id_recv,
                        "Binary frame ignored"
                    );
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    tracing::trace!(session_id = %session_id_recv, "Ping/pong");
                }
                Ok(Message::Close(_)) => {
                    tracing::info!(session_id = %session_id_recv, "Client closed connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!(
                        session_id = %session_id_recv,
                        error = %e,
                        "WebSocket error"
                    );
                    break;
                }
            }
        }
    });

    let session_id_send = session_id.clone();

    // Writer: drain the outbound queue into the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event.to_json() {
                Ok(json) => {
                    if ws_sink.send(Message::Text(json.into())).await.is_err() {
                        tracing::warn!(
                            session_id = %session_id_send,
                            "Failed to send event to WebSocket"
                        );
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        session_id = %session_id_send,
                        error = %e,
                        "Failed to encode outbound event"
                    );
                }
            }
        }

        // Close the WebSocket when the channel is closed
        let _ = ws_sink.close().await;
    });

    // Whichever task ends first, stop the other before cleanup so no event
    // is dispatched for this session after its membership is released.
    tokio::select! {
        _ = &mut recv_task => {
            send_task.abort();
            tracing::debug!(session_id = %session_id, "Receive task ended");
        }
        _ = &mut send_task => {
            recv_task.abort();
            tracing::debug!(session_id = %session_id, "Send task ended");
        }
    }

    cleanup_connection(&state, &session_id, &connection);
}

/// Handle a text frame from the client.
///
/// A frame that does not decode is dropped: malformed input never crashes
/// the connection task and is never reported to the client.
fn handle_text_frame(state: &GatewayState, connection: &Arc<Connection>, text: &str) {
    let event = match ClientEvent::from_json(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!(
                session_id = %connection.session_id(),
                error = %e,
                "Dropping malformed frame"
            );
            return;
        }
    };

    tracing::trace!(
        session_id = %connection.session_id(),
        event = %event,
        "Received event"
    );

    EventDispatcher::dispatch(state, connection, event);
}

/// Clean up a connection on disconnect. Runs exactly once per connection,
/// whether or not it ever joined a room.
fn cleanup_connection(state: &GatewayState, session_id: &str, connection: &Arc<Connection>) {
    tracing::info!(session_id = %session_id, "Cleaning up connection");

    handlers::handle_disconnect(state, connection);
    state.connection_manager().remove_connection(session_id);
}
