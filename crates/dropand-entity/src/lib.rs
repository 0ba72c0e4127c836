//! # dropand-entity
//!
//! Domain entity models for DropAnd. [`directory::Directory`] is the single
//! persisted table row; the remaining types are transfer projections and
//! value objects built from it.

pub mod directory;
pub mod user;

pub use directory::{Directory, DirectoryNode, DirectoryTreeNode, NewDirectory};
pub use user::UserRole;
