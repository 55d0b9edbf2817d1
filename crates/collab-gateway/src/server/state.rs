//! Gateway state
//!
//! Application state for the gateway server.

use crate::connection::ConnectionManager;
use crate::registry::RoomRegistry;
use collab_common::AppConfig;
use std::sync::Arc;

/// Gateway application state
///
/// Owns the shared room registry and connection manager; cloned into every
/// connection task. Separate states hold separate registries, so servers
/// (and tests) can run side by side without sharing rooms.
#[derive(Clone)]
pub struct GatewayState {
    /// Room membership and fan-out
    registry: Arc<RoomRegistry>,
    /// Live WebSocket connections
    connection_manager: Arc<ConnectionManager>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl GatewayState {
    /// Create a new gateway state with its own registry
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            registry: RoomRegistry::new_shared(),
            connection_manager: ConnectionManager::new_shared(),
            config: Arc::new(config),
        }
    }

    /// Get the room registry
    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    /// Get the connection manager
    pub fn connection_manager(&self) -> &ConnectionManager {
        &self.connection_manager
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("registry", &self.registry)
            .field("connection_manager", &self.connection_manager)
            .finish()
    }
}
