//! Gateway server setup
//!
//! Provides the WebSocket route, health check, and static frontend serving.

mod handler;
mod state;

pub use handler::gateway_handler;
pub use state::GatewayState;

use axum::{routing::get, Router};
use collab_common::{AppConfig, AppError};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Create the gateway router.
///
/// Everything that is not `/ws` or `/health` falls through to the static
/// frontend bundle, with `index.html` as the SPA fallback.
pub fn create_router(static_dir: &str) -> Router<GatewayState> {
    let index = format!("{static_dir}/index.html");
    let frontend = ServeDir::new(static_dir).not_found_service(ServeFile::new(index));

    Router::new()
        .route("/ws", get(gateway_handler))
        .route("/health", get(health_check))
        .fallback_service(frontend)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Build the complete application
pub fn create_app(state: GatewayState) -> Router {
    create_router(&state.config().static_files.dir)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run the gateway server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    tracing::info!("Starting gateway server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::transport(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("Gateway listening on ws://{}/ws", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::transport(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete gateway server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .gateway
        .address()
        .parse()
        .map_err(|e| AppError::config(format!("Invalid bind address: {e}")))?;

    let state = GatewayState::new(config);
    let app = create_app(state);

    run_server(app, addr).await
}
