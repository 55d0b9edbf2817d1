//! Room registry
//!
//! Single source of truth for room membership, shared by every connection
//! task. Each entry pairs the member set with the room's outbound routing
//! table so that a membership edit and the broadcast of its snapshot happen
//! under the same per-room critical section: two broadcasts for one room
//! always reflect two totally-ordered states.
//!
//! No operation performs I/O or awaits while a map guard is held; fan-out
//! enqueues onto each recipient's bounded channel with `try_send`.

use crate::protocol::ServerEvent;
use collab_core::{Room, RoomId, UserName};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

/// One session's outbound queue, as seen by the registry.
#[derive(Debug, Clone)]
struct Subscriber {
    session_id: String,
    sender: mpsc::Sender<ServerEvent>,
}

/// Member set plus routing table of a single live room.
#[derive(Debug, Default)]
struct RoomEntry {
    room: Room,
    subscribers: Vec<Subscriber>,
}

impl RoomEntry {
    fn subscribe(&mut self, session_id: &str, sender: mpsc::Sender<ServerEvent>) {
        if !self.subscribers.iter().any(|s| s.session_id == session_id) {
            self.subscribers.push(Subscriber {
                session_id: session_id.to_string(),
                sender,
            });
        }
    }

    fn unsubscribe(&mut self, session_id: &str) {
        self.subscribers.retain(|s| s.session_id != session_id);
    }

    /// Enqueue `event` to every subscriber except `exclude`. A recipient
    /// whose queue is full or closed is skipped; one slow or dead client
    /// never aborts delivery to the rest of the room.
    fn fan_out(&self, event: &ServerEvent, exclude: Option<&str>) {
        for subscriber in &self.subscribers {
            if exclude == Some(subscriber.session_id.as_str()) {
                continue;
            }

            if let Err(e) = subscriber.sender.try_send(event.clone()) {
                tracing::debug!(
                    session_id = %subscriber.session_id,
                    event = %event,
                    error = %e,
                    "Dropping event for unreachable subscriber"
                );
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.room.is_empty() && self.subscribers.is_empty()
    }
}

/// Process-wide mapping from room id to live room state.
///
/// Rooms are implicitly created on first join and evicted once their member
/// set empties; a room with zero members does not persist in the registry.
pub struct RoomRegistry {
    rooms: DashMap<RoomId, RoomEntry>,
}

impl RoomRegistry {
    /// Create a new, empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    /// Create a new registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Add `user_name` to `room_id`, creating the room if absent, and
    /// broadcast the resulting membership snapshot to the whole room -
    /// including the joining session, and even when the name was already
    /// present (clients always receive a fresh snapshot after a join).
    ///
    /// Returns the snapshot.
    pub fn join(
        &self,
        room_id: &RoomId,
        user_name: &UserName,
        session_id: &str,
        sender: mpsc::Sender<ServerEvent>,
    ) -> Vec<UserName> {
        let mut entry = self.rooms.entry(room_id.clone()).or_default();
        entry.subscribe(session_id, sender);
        entry.room.add(user_name.clone());

        let members = entry.room.snapshot();
        entry.fan_out(&ServerEvent::UserJoined(members.clone()), None);

        tracing::debug!(
            room_id = %room_id,
            user_name = %user_name,
            members = members.len(),
            "User added to room"
        );

        members
    }

    /// Remove `user_name` and the session from `room_id` and broadcast the
    /// resulting snapshot to the remaining sessions; the departing session
    /// does not receive it. No-op for an unknown room or absent name.
    ///
    /// Evicts the room entry once its member set is empty. Returns the
    /// post-removal snapshot.
    pub fn leave(&self, room_id: &RoomId, user_name: &UserName, session_id: &str) -> Vec<UserName> {
        let members = match self.rooms.get_mut(room_id) {
            Some(mut entry) => {
                entry.unsubscribe(session_id);
                entry.room.remove(user_name);

                let members = entry.room.snapshot();
                entry.fan_out(&ServerEvent::UserJoined(members.clone()), None);
                members
            }
            None => return Vec::new(),
        };

        // Re-checked under the shard lock: a join racing this leave keeps
        // the entry alive.
        self.rooms.remove_if(room_id, |_, entry| entry.is_empty());

        tracing::debug!(
            room_id = %room_id,
            user_name = %user_name,
            members = members.len(),
            "User removed from room"
        );

        members
    }

    /// Read-only membership snapshot; empty for an unknown room.
    #[must_use]
    pub fn members_of(&self, room_id: &RoomId) -> Vec<UserName> {
        self.rooms
            .get(room_id)
            .map(|entry| entry.room.snapshot())
            .unwrap_or_default()
    }

    /// Broadcast primitive for ephemeral events: enqueue `event` to every
    /// session in `room_id` except `exclude_session`. No-op for an unknown
    /// room.
    pub fn relay(&self, room_id: &RoomId, event: &ServerEvent, exclude_session: &str) {
        if let Some(entry) = self.rooms.get(room_id) {
            entry.fan_out(event, Some(exclude_session));
        } else {
            tracing::trace!(room_id = %room_id, event = %event, "Relay to unknown room ignored");
        }
    }

    /// Number of live rooms
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RoomRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomRegistry")
            .field("rooms", &self.rooms.len())
            .finish()
    }
}
