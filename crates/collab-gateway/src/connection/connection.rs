//! Individual WebSocket connection
//!
//! Represents a single connection and its transient session state.

use crate::protocol::ServerEvent;
use collab_core::{RoomId, UserName};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::mpsc;

/// The room/user pair a connection is currently bound to.
///
/// Both fields exist together or not at all: a connection is either in a
/// room under a name, or in no room - never one without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomBinding {
    pub room: RoomId,
    pub user: UserName,
}

/// A single WebSocket connection.
///
/// The binding lock is only ever taken by the connection's own task, which
/// processes inbound events strictly in arrival order; it is a sync lock
/// because it is never held across an await point.
pub struct Connection {
    /// Unique session ID
    session_id: String,

    /// Current room binding (None while unbound)
    binding: RwLock<Option<RoomBinding>>,

    /// Channel to send events to the WebSocket writer task
    sender: mpsc::Sender<ServerEvent>,
}

impl Connection {
    /// Create a new connection
    pub fn new(session_id: String, sender: mpsc::Sender<ServerEvent>) -> Arc<Self> {
        Arc::new(Self {
            session_id,
            binding: RwLock::new(None),
            sender,
        })
    }

    /// Get the session ID
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Current binding, if any
    pub fn binding(&self) -> Option<RoomBinding> {
        self.binding.read().clone()
    }

    /// Whether the connection is bound to a room
    pub fn is_bound(&self) -> bool {
        self.binding.read().is_some()
    }

    /// Bind to a room under a user name
    pub fn bind(&self, room: RoomId, user: UserName) {
        *self.binding.write() = Some(RoomBinding { room, user });
    }

    /// Clear and return the current binding
    pub fn unbind(&self) -> Option<RoomBinding> {
        self.binding.write().take()
    }

    /// Get a clone of the sender channel
    pub fn sender(&self) -> mpsc::Sender<ServerEvent> {
        self.sender.clone()
    }

    /// Check if the sender channel is closed
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("session_id", &self.session_id)
            .field("binding", &*self.binding.read())
            .finish()
    }
}
