//! Integration test utilities for the collaborative session gateway
//!
//! Spawns the real gateway on an ephemeral port and drives it over real
//! WebSocket connections. No external services are required.

pub mod helpers;

pub use helpers::*;
