//! Join/leave handlers
//!
//! Owns the per-connection state machine: Unbound -> Bound(room, user) ->
//! Unbound. The binding and the registry membership are updated together;
//! a connection holds at most one room membership at a time.

use crate::connection::Connection;
use crate::protocol::JoinPayload;
use crate::server::GatewayState;
use std::sync::Arc;

/// Handle a `join` event: leave the current room if bound, then join the
/// requested one. Joining the bound room again still passes through
/// leave-then-join, so the room observes two snapshots.
pub fn handle_join(state: &GatewayState, connection: &Arc<Connection>, payload: JoinPayload) {
    let JoinPayload { room_id, user_name } = payload;

    if let Some(prev) = connection.unbind() {
        state
            .registry()
            .leave(&prev.room, &prev.user, connection.session_id());

        tracing::debug!(
            session_id = %connection.session_id(),
            room_id = %prev.room,
            user_name = %prev.user,
            "Left previous room on switch"
        );
    }

    state.registry().join(
        &room_id,
        &user_name,
        connection.session_id(),
        connection.sender(),
    );
    connection.bind(room_id.clone(), user_name.clone());

    tracing::info!(
        session_id = %connection.session_id(),
        room_id = %room_id,
        user_name = %user_name,
        "User joined room"
    );
}

/// Handle an explicit `leaveRoom` event. Ignored when unbound.
pub fn handle_leave(state: &GatewayState, connection: &Arc<Connection>) {
    let Some(prev) = connection.unbind() else {
        tracing::trace!(
            session_id = %connection.session_id(),
            "leaveRoom from unbound connection ignored"
        );
        return;
    };

    state
        .registry()
        .leave(&prev.room, &prev.user, connection.session_id());

    tracing::info!(
        session_id = %connection.session_id(),
        room_id = %prev.room,
        user_name = %prev.user,
        "User left room"
    );
}

/// Handle a transport-level disconnect: same membership effect as an
/// explicit leave. Safe to call for connections that were never bound.
pub fn handle_disconnect(state: &GatewayState, connection: &Arc<Connection>) {
    let Some(prev) = connection.unbind() else {
        return;
    };

    state
        .registry()
        .leave(&prev.room, &prev.user, connection.session_id());

    tracing::info!(
        session_id = %connection.session_id(),
        room_id = %prev.room,
        user_name = %prev.user,
        "User disconnected from room"
    );
}
