//! # Backend Service
//!
//! Thin entry point that delegates to lib-web for server setup.

use lib_core::{AppError, Config};
use lib_web::{init_tracing, start_server};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    info!("Loading configuration...");
    let config = Config::from_env()
        .and_then(|config| config.validate().map(|_| config))
        .map_err(|e| {
            error!("Invalid configuration: {}", e);
            AppError::Config(e)
        })?;

    start_server(config).await
}
