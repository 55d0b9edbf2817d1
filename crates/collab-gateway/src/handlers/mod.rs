//! Inbound event handlers
//!
//! Dispatches decoded client events to the room and relay handlers. The
//! match is exhaustive: adding an event kind without handling it is a
//! compile error.
//!
//! Handlers are infallible by contract - the protocol has no error channel,
//! so anything that cannot be acted on (an ephemeral event from an unbound
//! connection, a relay into an evicted room) is absorbed as a logged no-op.

mod relay;
mod room;

pub use room::handle_disconnect;

use crate::connection::Connection;
use crate::protocol::ClientEvent;
use crate::server::GatewayState;
use std::sync::Arc;

/// Dispatch incoming client events to the appropriate handler
pub struct EventDispatcher;

impl EventDispatcher {
    /// Handle one decoded client event.
    ///
    /// Called from the connection's reader task only, so events of a single
    /// connection are processed strictly in arrival order.
    pub fn dispatch(state: &GatewayState, connection: &Arc<Connection>, event: ClientEvent) {
        match event {
            ClientEvent::Join(payload) => room::handle_join(state, connection, payload),
            ClientEvent::LeaveRoom => room::handle_leave(state, connection),
            ClientEvent::CodeChange(payload) => relay::handle_code_change(state, connection, payload),
            ClientEvent::Typing(payload) => relay::handle_typing(state, connection, &payload, true),
            ClientEvent::StopTyping(payload) => {
                relay::handle_typing(state, connection, &payload, false);
            }
            ClientEvent::LanguageChange(payload) => {
                relay::handle_language_change(state, connection, payload);
            }
        }
    }
}
