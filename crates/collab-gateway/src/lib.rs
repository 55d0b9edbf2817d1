//! # collab-gateway
//!
//! WebSocket gateway for real-time collaborative editing sessions: room
//! membership, presence, and event fan-out.

pub mod connection;
pub mod handlers;
pub mod protocol;
pub mod registry;
pub mod server;
