//! Backend selection.

use std::sync::Arc;

use tracing::{info, warn};

use dropand_core::config::{DatabaseConfig, StoreProvider};
use dropand_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryDirectoryBackend;
use crate::migration::run_migrations;
use crate::repositories::DirectoryRepository;
use crate::store::DirectoryBackend;

/// Builds the configured [`DirectoryBackend`].
#[derive(Debug)]
pub struct StoreManager;

impl StoreManager {
    /// Connect to the backend named by `config.provider`.
    ///
    /// For PostgreSQL, pending migrations are applied first when
    /// `auto_migrate` is set.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Arc<dyn DirectoryBackend>> {
        let backend: Arc<dyn DirectoryBackend> = match config.provider {
            StoreProvider::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                if config.auto_migrate {
                    run_migrations(pool.pool()).await?;
                }
                Arc::new(DirectoryRepository::new(pool.into_pool()))
            }
            StoreProvider::Memory => {
                warn!("Using in-memory directory store; data is lost on restart");
                Arc::new(MemoryDirectoryBackend::new())
            }
        };

        info!(provider = backend.name(), "Directory store ready");
        Ok(backend)
    }
}
