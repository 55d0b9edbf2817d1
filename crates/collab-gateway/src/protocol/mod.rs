//! Gateway protocol definitions
//!
//! One JSON text frame per event, shaped `{"event": <name>, "data": <payload>}`.
//! Inbound and outbound events are closed sum types so that adding or
//! removing an event kind is a compile-time-checked change.

mod messages;
mod payloads;

pub use messages::{ClientEvent, ServerEvent};
pub use payloads::{CodeChangePayload, JoinPayload, LanguageChangePayload, TypingPayload};
