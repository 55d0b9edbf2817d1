//! Inbound event payloads
//!
//! Every payload field is a client-supplied string, trusted as-is. The
//! `room_id` (and, for typing, `user_name`) carried by ephemeral events is
//! accepted for wire compatibility but ignored for routing: the server
//! routes by the connection's bound room, so a client cannot inject events
//! into a room it has not joined.

use collab_core::{RoomId, UserName};
use serde::{Deserialize, Serialize};

/// Payload of a `join` event: join or switch room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinPayload {
    pub room_id: RoomId,
    pub user_name: UserName,
}

/// Payload of a `codeChange` event: the full buffer, no diffing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeChangePayload {
    pub room_id: Option<RoomId>,
    pub code: String,
}

/// Payload of `typing` / `stopTyping` events. Purely advisory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingPayload {
    pub room_id: Option<RoomId>,
    pub user_name: Option<UserName>,
}

/// Payload of a `languageChange` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageChangePayload {
    pub room_id: Option<RoomId>,
    pub language: String,
}
