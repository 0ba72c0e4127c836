//! Flat transfer projection returned to callers.

use serde::{Deserialize, Serialize};

use dropand_core::types::DirectoryId;

use super::model::Directory;

/// The flat node shape every directory operation returns.
///
/// `has_children` is derived from a store existence check at projection
/// time and never cached on the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryNode {
    /// Directory id.
    pub id: DirectoryId,
    /// Display name.
    pub name: String,
    /// Parent id, `null` for roots.
    pub parent_id: Option<DirectoryId>,
    /// Display position among siblings.
    pub sort_order: i32,
    /// Whether at least one directory lists this one as its parent.
    pub has_children: bool,
}

impl DirectoryNode {
    /// Project a row given the result of the children existence check.
    pub fn project(directory: Directory, has_children: bool) -> Self {
        Self {
            id: directory.id,
            name: directory.name,
            parent_id: directory.parent_id,
            sort_order: directory.sort_order,
            has_children,
        }
    }
}
