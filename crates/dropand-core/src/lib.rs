//! # dropand-core
//!
//! Core crate for DropAnd. Contains configuration schemas, the typed
//! directory identifier, and the unified error system.
//!
//! This crate has **no** internal dependencies on other DropAnd crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
pub use types::DirectoryId;
