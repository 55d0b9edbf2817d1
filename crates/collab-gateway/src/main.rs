//! Collaborative session gateway entry point
//!
//! Run with:
//! ```bash
//! cargo run -p collab-gateway
//! ```
//!
//! Configuration is loaded from environment variables.

use collab_common::{try_init_tracing, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize tracing
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    // Run the server
    if let Err(e) = run().await {
        error!(error = %e, "Gateway failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting collaborative session gateway...");

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        port = config.gateway.port,
        static_dir = %config.static_files.dir,
        "Configuration loaded"
    );

    // Run the gateway server
    collab_gateway::server::run(config).await?;

    Ok(())
}
