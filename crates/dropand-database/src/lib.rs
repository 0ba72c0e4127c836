//! # dropand-database
//!
//! The directory store: the [`store::DirectoryStore`] contract consumed by
//! the service layer, its PostgreSQL implementation, an in-memory
//! implementation, connection management, and migrations.

pub mod connection;
pub mod manager;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use manager::StoreManager;
pub use memory::MemoryDirectoryBackend;
pub use repositories::DirectoryRepository;
pub use store::{DirectoryBackend, DirectoryStore, DirectoryTransaction};
