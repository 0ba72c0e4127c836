//! Repository implementations backed by PostgreSQL.

pub mod directory;

pub use directory::{DirectoryRepository, PgDirectoryTransaction};
