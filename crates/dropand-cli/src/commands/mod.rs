//! CLI command definitions and dispatch.

pub mod directory;
pub mod migrate;
pub mod password;
pub mod serve;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use dropand_core::config::AppConfig;
use dropand_core::error::AppError;
use dropand_database::{DirectoryBackend, StoreManager};

use crate::output::OutputFormat;

/// DropAnd directory tree service
#[derive(Debug, Parser)]
#[command(name = "dropand", version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file (defaults to config/ plus DROPAND_ENV)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the DropAnd server
    Serve(serve::ServeArgs),
    /// Apply pending database migrations
    Migrate,
    /// Directory tree management
    Directory(directory::DirectoryArgs),
    /// Hash a password for `auth.users`
    HashPassword(password::HashPasswordArgs),
}

impl Cli {
    /// Whether this invocation runs the server.
    pub fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve(_))
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config_path = self.config.as_deref();
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config_path).await,
            Commands::Migrate => migrate::execute(config_path).await,
            Commands::Directory(args) => directory::execute(args, config_path, self.format).await,
            Commands::HashPassword(args) => password::execute(args),
        }
    }
}

/// Helper: load configuration from an explicit file or the environment
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, AppError> {
    match config_path {
        Some(path) => AppConfig::load_from(path),
        None => {
            let env = std::env::var("DROPAND_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load(&env)
        }
    }
}

/// Helper: connect the configured directory store
pub async fn connect_store(config: &AppConfig) -> Result<Arc<dyn DirectoryBackend>, AppError> {
    StoreManager::connect(&config.database).await
}
