//! Convenience result type alias for DropAnd.

use crate::error::AppError;

/// A specialized `Result` type for DropAnd operations.
pub type AppResult<T> = Result<T, AppError>;
