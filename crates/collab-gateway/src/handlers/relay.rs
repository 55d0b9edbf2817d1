//! Ephemeral event relays
//!
//! codeChange, typing, stopTyping, and languageChange carry no server-side
//! state: they are fanned out to every other connection in the sender's
//! bound room and forgotten. An unbound sender is not an error - ephemeral
//! events racing a leave are expected - so the event is simply dropped.

use crate::connection::Connection;
use crate::protocol::{CodeChangePayload, LanguageChangePayload, ServerEvent, TypingPayload};
use crate::server::GatewayState;
use std::sync::Arc;

/// Relay the full buffer to every other connection in the bound room.
pub fn handle_code_change(
    state: &GatewayState,
    connection: &Arc<Connection>,
    payload: CodeChangePayload,
) {
    let Some(binding) = connection.binding() else {
        tracing::trace!(
            session_id = %connection.session_id(),
            "codeChange from unbound connection ignored"
        );
        return;
    };

    // Routing uses the binding; the payload's room id is advisory only.
    if let Some(payload_room) = &payload.room_id {
        if *payload_room != binding.room {
            tracing::trace!(
                session_id = %connection.session_id(),
                bound_room = %binding.room,
                payload_room = %payload_room,
                "Payload room differs from bound room; relaying to bound room"
            );
        }
    }

    state.registry().relay(
        &binding.room,
        &ServerEvent::CodeUpdate(payload.code),
        connection.session_id(),
    );
}

/// Relay a typing indicator (on or off) under the bound user name.
pub fn handle_typing(
    state: &GatewayState,
    connection: &Arc<Connection>,
    _payload: &TypingPayload,
    started: bool,
) {
    let Some(binding) = connection.binding() else {
        tracing::trace!(
            session_id = %connection.session_id(),
            "typing indicator from unbound connection ignored"
        );
        return;
    };

    let event = if started {
        ServerEvent::UserTyping(binding.user)
    } else {
        ServerEvent::UserStoppedTyping(binding.user)
    };

    state
        .registry()
        .relay(&binding.room, &event, connection.session_id());
}

/// Relay a language selection to every other connection in the bound room.
/// Not retained: a later joiner cannot learn the current language.
pub fn handle_language_change(
    state: &GatewayState,
    connection: &Arc<Connection>,
    payload: LanguageChangePayload,
) {
    let Some(binding) = connection.binding() else {
        tracing::trace!(
            session_id = %connection.session_id(),
            "languageChange from unbound connection ignored"
        );
        return;
    };

    state.registry().relay(
        &binding.room,
        &ServerEvent::LanguageUpdate(payload.language),
        connection.session_id(),
    );
}
