//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field carries a serde default, so an empty file (or no
//! file at all) yields a runnable development configuration.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod static_files;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::{AuthConfig, UserConfig};
pub use self::database::{DatabaseConfig, StoreProvider};
pub use self::logging::LoggingConfig;
pub use self::static_files::StaticFilesConfig;

use crate::error::AppError;

/// Prefix for environment variable overrides (`DROPAND__SERVER__PORT=9000`).
const ENV_PREFIX: &str = "DROPAND";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Directory store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Login gate settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Bundled front-end settings.
    #[serde(default)]
    pub static_files: StaticFilesConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the given environment name.
    ///
    /// Merges `config/default.toml`, the `config/{env}.toml` overlay and
    /// environment variables prefixed with `DROPAND__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false));

        Self::finish(builder)
    }

    /// Load configuration from an explicit file, still honouring
    /// environment variable overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AppError::configuration(format!(
                "Configuration file '{}' does not exist",
                path.display()
            )));
        }

        let builder = config::Config::builder().add_source(config::File::from(path));
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, AppError> {
        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_yields_defaults() {
        let config: AppConfig = config::Config::builder()
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("empty config should deserialize");

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.provider, StoreProvider::Postgres);
        assert_eq!(config.auth.login_path, "/login");
        assert_eq!(config.static_files.mount_path, "/html5");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_toml_overrides() {
        let toml = r#"
            [server]
            port = 9090

            [database]
            provider = "memory"

            [[auth.users]]
            username = "alice"
            password_hash = "$argon2id$stub"
            role = "user"
        "#;

        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("toml config should deserialize");

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.provider, StoreProvider::Memory);
        assert_eq!(config.auth.users.len(), 1);
        assert_eq!(config.auth.users[0].username, "alice");
    }

    #[test]
    fn test_missing_explicit_file_is_configuration_error() {
        let err = AppConfig::load_from("does/not/exist.toml").unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }
}
