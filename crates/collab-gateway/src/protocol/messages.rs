//! Gateway message format
//!
//! Defines the inbound and outbound event enums and their JSON framing.

use super::{CodeChangePayload, JoinPayload, LanguageChangePayload, TypingPayload};
use collab_core::UserName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Events a client may send.
///
/// A frame that does not parse into one of these is dropped by the caller;
/// the protocol has no error-acknowledgment channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Join a room, leaving the current one first if bound.
    Join(JoinPayload),
    /// Replace the shared buffer; relayed verbatim to the rest of the room.
    CodeChange(CodeChangePayload),
    /// Typing indicator on.
    Typing(TypingPayload),
    /// Typing indicator off.
    StopTyping(TypingPayload),
    /// Select a language tag; relayed to the rest of the room.
    LanguageChange(LanguageChangePayload),
    /// Explicitly leave the current room. Carries no payload.
    LeaveRoom,
}

impl ClientEvent {
    /// Deserialize from a JSON text frame
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to a JSON text frame
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Event name as it appears on the wire
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Join(_) => "join",
            Self::CodeChange(_) => "codeChange",
            Self::Typing(_) => "typing",
            Self::StopTyping(_) => "stopTyping",
            Self::LanguageChange(_) => "languageChange",
            Self::LeaveRoom => "leaveRoom",
        }
    }
}

impl fmt::Display for ClientEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Events the server sends to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// Full membership snapshot of the room, in join order.
    UserJoined(Vec<UserName>),
    /// Relayed buffer contents.
    CodeUpdate(String),
    /// Relayed typing indicator on.
    UserTyping(UserName),
    /// Relayed typing indicator off.
    UserStoppedTyping(UserName),
    /// Relayed language selection.
    LanguageUpdate(String),
}

impl ServerEvent {
    /// Serialize to a JSON text frame
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from a JSON text frame
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Event name as it appears on the wire
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::UserJoined(_) => "userJoined",
            Self::CodeUpdate(_) => "codeUpdate",
            Self::UserTyping(_) => "userTyping",
            Self::UserStoppedTyping(_) => "userStoppedTyping",
            Self::LanguageUpdate(_) => "languageUpdate",
        }
    }
}

impl fmt::Display for ServerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
