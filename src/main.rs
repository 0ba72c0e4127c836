//! DropAnd Server - directory tree backend
//!
//! Main entry point: loads configuration, sets up logging, and runs the
//! HTTP server.

use tracing_subscriber::{EnvFilter, fmt};

use dropand_core::config::AppConfig;
use dropand_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    tracing::info!("Starting DropAnd v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = dropand_api::run_server(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from `DROPAND_CONFIG`, or from `config/` using the
/// `DROPAND_ENV` overlay.
fn load_configuration() -> Result<AppConfig, AppError> {
    match std::env::var("DROPAND_CONFIG") {
        Ok(path) => AppConfig::load_from(path),
        Err(_) => {
            let env = std::env::var("DROPAND_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load(&env)
        }
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
