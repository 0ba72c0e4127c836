//! Nested subtree structure for hierarchical display.

use serde::{Deserialize, Serialize};

use dropand_core::types::DirectoryId;

/// A directory with its descendants nested beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryTreeNode {
    /// Directory id.
    pub id: DirectoryId,
    /// Display name.
    pub name: String,
    /// Display position among siblings.
    pub sort_order: i32,
    /// Child nodes ordered by sort position.
    pub children: Vec<DirectoryTreeNode>,
}

impl DirectoryTreeNode {
    /// Number of nodes in this subtree, including the root.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Self::size).sum::<usize>()
    }
}
