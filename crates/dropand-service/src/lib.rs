//! # dropand-service
//!
//! Business logic for the directory tree. Services receive their store
//! backend as an `Arc<dyn DirectoryBackend>` at construction time and run
//! every public operation inside one store transaction.

pub mod context;
pub mod directory;

pub use context::RequestContext;
pub use directory::{DirectoryOrder, DirectoryService, TreeService};
