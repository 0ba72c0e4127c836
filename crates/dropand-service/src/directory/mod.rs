//! Directory tree operations.

pub mod service;
pub mod tree;

pub use service::{DirectoryOrder, DirectoryService};
pub use tree::TreeService;
