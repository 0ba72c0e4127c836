//! Directory domain entities.

pub mod model;
pub mod node;
pub mod tree;

pub use model::{DEFAULT_SORT_ORDER, Directory, MAX_NAME_LENGTH, NewDirectory, validate_name};
pub use node::DirectoryNode;
pub use tree::DirectoryTreeNode;
