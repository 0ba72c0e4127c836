//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use dropand_auth::Authenticator;
use dropand_core::config::AppConfig;
use dropand_core::result::AppResult;
use dropand_database::DirectoryBackend;
use dropand_service::{DirectoryService, TreeService};

/// Shared dependencies, passed to every handler via `State<AppState>`.
///
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Directory store backend
    pub backend: Arc<dyn DirectoryBackend>,
    /// Login and session token checks
    pub authenticator: Arc<Authenticator>,
    /// Directory tree operations
    pub directory_service: Arc<DirectoryService>,
    /// Nested subtree views
    pub tree_service: Arc<TreeService>,
}

impl AppState {
    /// Wire services around an already connected backend.
    pub fn new(config: AppConfig, backend: Arc<dyn DirectoryBackend>) -> AppResult<Self> {
        let authenticator = Arc::new(Authenticator::new(&config.auth)?);
        let directory_service = Arc::new(DirectoryService::new(Arc::clone(&backend)));
        let tree_service = Arc::new(TreeService::new(Arc::clone(&backend)));

        Ok(Self {
            config: Arc::new(config),
            backend,
            authenticator,
            directory_service,
            tree_service,
        })
    }
}
