//! Directory entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use dropand_core::error::AppError;
use dropand_core::types::DirectoryId;

/// Sort position given to a node whose position was never set.
pub const DEFAULT_SORT_ORDER: i32 = 0;

/// Longest accepted directory name, in characters.
pub const MAX_NAME_LENGTH: usize = 255;

/// A directory row.
///
/// Children are not stored on the row; they are always recomputed from the
/// store by querying on `parent_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Directory {
    /// Store-assigned identifier, immutable after insert.
    pub id: DirectoryId,
    /// Display name, never blank.
    pub name: String,
    /// Informational materialized path, not used for lookup.
    pub path: String,
    /// Display position among siblings.
    pub sort_order: i32,
    /// Parent directory (None for root directories).
    pub parent_id: Option<DirectoryId>,
}

impl Directory {
    /// Check if this is a root directory (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Reject rows that may not be persisted.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_name(&self.name)
    }

    /// Point this directory at a new parent and recompute its path.
    pub fn reparent(&mut self, parent: Option<&Directory>) {
        self.parent_id = parent.map(|p| p.id);
        self.path = child_path(parent.map(|p| p.path.as_str()), &self.name);
    }

    /// Rename and recompute the last path segment.
    pub fn rename(&mut self, name: &str) {
        self.name = name.to_string();
        self.path = match self.path.rfind('/') {
            Some(pos) if pos > 0 => format!("{}/{}", &self.path[..pos], name),
            _ => format!("/{name}"),
        };
    }
}

/// Data required to insert a new directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDirectory {
    /// Display name.
    pub name: String,
    /// Informational path.
    pub path: String,
    /// Display position among siblings.
    pub sort_order: i32,
    /// Parent directory (None for root).
    pub parent_id: Option<DirectoryId>,
}

impl NewDirectory {
    /// A directory named `name` placed under `parent` at `sort_order`.
    pub fn under(name: &str, parent: Option<&Directory>, sort_order: i32) -> Self {
        Self {
            name: name.to_string(),
            path: child_path(parent.map(|p| p.path.as_str()), name),
            sort_order,
            parent_id: parent.map(|p| p.id),
        }
    }

    /// Reject rows that may not be persisted.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_name(&self.name)
    }
}

/// Reject blank names and names longer than [`MAX_NAME_LENGTH`].
pub fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Directory name is required"));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::validation(format!(
            "Directory name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

fn child_path(parent_path: Option<&str>, name: &str) -> String {
    match parent_path {
        Some(parent) => format!("{}/{}", parent.trim_end_matches('/'), name),
        None => format!("/{name}"),
    }
}
