//! Nested subtree views.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use dropand_core::error::AppError;
use dropand_core::result::AppResult;
use dropand_core::types::DirectoryId;
use dropand_database::store::DirectoryBackend;
use dropand_entity::directory::{Directory, DirectoryTreeNode};

use crate::context::RequestContext;

/// Builds nested directory trees.
#[derive(Debug, Clone)]
pub struct TreeService {
    backend: Arc<dyn DirectoryBackend>,
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(backend: Arc<dyn DirectoryBackend>) -> Self {
        Self { backend }
    }

    /// The subtree rooted at `id`, children ordered by sort position.
    pub async fn subtree(
        &self,
        _ctx: &RequestContext,
        id: DirectoryId,
    ) -> AppResult<DirectoryTreeNode> {
        let tx = self.backend.begin().await?;
        let root = tx
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Directory not found with id: {id}")))?;

        let mut children: HashMap<DirectoryId, Vec<Directory>> = HashMap::new();
        let mut visited = HashSet::from([root.id]);
        let mut queue = VecDeque::from([root.id]);
        while let Some(current) = queue.pop_front() {
            let found: Vec<Directory> = tx
                .find_children(current)
                .await?
                .into_iter()
                .filter(|child| visited.insert(child.id))
                .collect();
            queue.extend(found.iter().map(|child| child.id));
            children.insert(current, found);
        }

        Ok(build_tree(root, &mut children))
    }
}

fn build_tree(
    directory: Directory,
    children: &mut HashMap<DirectoryId, Vec<Directory>>,
) -> DirectoryTreeNode {
    let nested = children
        .remove(&directory.id)
        .unwrap_or_default()
        .into_iter()
        .map(|child| build_tree(child, children))
        .collect();

    DirectoryTreeNode {
        id: directory.id,
        name: directory.name,
        sort_order: directory.sort_order,
        children: nested,
    }
}
