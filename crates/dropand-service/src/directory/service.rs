//! Directory create, move, reorder, rename, and delete.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use dropand_core::error::AppError;
use dropand_core::result::AppResult;
use dropand_core::types::DirectoryId;
use dropand_database::store::{DirectoryBackend, DirectoryStore};
use dropand_entity::directory::{
    DEFAULT_SORT_ORDER, Directory, DirectoryNode, NewDirectory, validate_name,
};

use crate::context::RequestContext;

/// Sort position given to the first node of a sibling group.
const FIRST_SORT_ORDER: i32 = 1;

/// One entry of a bulk reorder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryOrder {
    /// Directory to reposition.
    pub id: DirectoryId,
    /// New parent, if the entry carries one.
    pub parent_id: Option<DirectoryId>,
    /// New position; `None` becomes [`DEFAULT_SORT_ORDER`].
    pub sort_order: Option<i32>,
}

/// Where a move lands.
#[derive(Debug)]
enum ParentResolution {
    /// No parent requested.
    Root,
    /// The requested parent exists.
    Existing(Directory),
    /// The requested parent was missing and a placeholder stands in for it.
    Placeholder(Directory),
    /// The placeholder could not be created; the node becomes a root.
    Demoted,
}

impl ParentResolution {
    fn parent(&self) -> Option<&Directory> {
        match self {
            Self::Existing(parent) | Self::Placeholder(parent) => Some(parent),
            Self::Root | Self::Demoted => None,
        }
    }
}

/// Maintains the directory tree.
#[derive(Debug, Clone)]
pub struct DirectoryService {
    backend: Arc<dyn DirectoryBackend>,
}

impl DirectoryService {
    /// Creates a new directory service.
    pub fn new(backend: Arc<dyn DirectoryBackend>) -> Self {
        Self { backend }
    }

    /// Root directories in display order.
    pub async fn list_roots(&self, _ctx: &RequestContext) -> AppResult<Vec<DirectoryNode>> {
        let tx = self.backend.begin().await?;
        let roots = tx.find_roots().await?;
        project_all(&*tx, roots).await
    }

    /// Direct children of `parent_id` in display order.
    pub async fn list_children(
        &self,
        _ctx: &RequestContext,
        parent_id: DirectoryId,
    ) -> AppResult<Vec<DirectoryNode>> {
        let tx = self.backend.begin().await?;
        require(&*tx, parent_id).await?;
        let children = tx.find_children(parent_id).await?;
        project_all(&*tx, children).await
    }

    /// A single directory.
    pub async fn get(&self, _ctx: &RequestContext, id: DirectoryId) -> AppResult<DirectoryNode> {
        let tx = self.backend.begin().await?;
        let directory = require(&*tx, id).await?;
        project(&*tx, directory).await
    }

    /// Create `name` as the last child of `parent_id`, or as the last root.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        name: &str,
        parent_id: Option<DirectoryId>,
    ) -> AppResult<DirectoryNode> {
        let name = required_name(name)?;

        let tx = self.backend.begin().await?;
        let parent = match parent_id {
            Some(id) => Some(tx.get(id).await?.ok_or_else(|| {
                AppError::not_found(format!("Parent directory not found with id: {id}"))
            })?),
            None => None,
        };

        let sort_order = next_after(tx.max_sort_order(parent_id).await?);
        let directory = tx
            .insert(&NewDirectory::under(name, parent.as_ref(), sort_order))
            .await?;
        let node = project(&*tx, directory).await?;
        tx.commit().await?;

        info!(
            user = %ctx.username,
            directory_id = %node.id,
            parent_id = ?node.parent_id,
            sort_order = node.sort_order,
            "Directory created"
        );

        Ok(node)
    }

    /// Rename a directory, recomputing its informational path.
    pub async fn rename(
        &self,
        ctx: &RequestContext,
        id: DirectoryId,
        name: &str,
    ) -> AppResult<DirectoryNode> {
        let name = required_name(name)?;

        let tx = self.backend.begin().await?;
        let mut directory = require(&*tx, id).await?;
        let old_name = std::mem::take(&mut directory.name);
        directory.rename(name);
        let directory = tx.update(&directory).await?;
        let node = project(&*tx, directory).await?;
        tx.commit().await?;

        info!(
            user = %ctx.username,
            directory_id = %id,
            old_name = %old_name,
            new_name = %node.name,
            "Directory renamed"
        );

        Ok(node)
    }

    /// Position a new child of `parent_id` would take: the largest sibling
    /// sort order plus one, or 1 for an empty group.
    ///
    /// The parent is not checked for existence.
    pub async fn next_sort_order(&self, parent_id: Option<DirectoryId>) -> AppResult<i32> {
        let tx = self.backend.begin().await?;
        Ok(next_after(tx.max_sort_order(parent_id).await?))
    }

    /// Move `id` under `new_parent_id` (or to the roots) at `sort_order`.
    ///
    /// A missing target parent is replaced by a freshly created placeholder
    /// root; if that placeholder cannot be created the node becomes a root.
    /// Moving a node beneath itself or one of its descendants is rejected.
    pub async fn move_directory(
        &self,
        ctx: &RequestContext,
        id: DirectoryId,
        new_parent_id: Option<DirectoryId>,
        sort_order: i32,
    ) -> AppResult<DirectoryNode> {
        let tx = self.backend.begin().await?;
        let mut directory = require(&*tx, id).await?;
        let old_parent_id = directory.parent_id;

        let resolution = match new_parent_id {
            None => ParentResolution::Root,
            Some(parent_id) => match tx.get(parent_id).await? {
                Some(parent) => {
                    if is_within_subtree(&*tx, &parent, id).await? {
                        return Err(AppError::validation(format!(
                            "Cannot move directory {id} beneath itself or one of its descendants"
                        )));
                    }
                    ParentResolution::Existing(parent)
                }
                None => match tx.insert(&placeholder_for(parent_id)).await {
                    Ok(placeholder) => {
                        info!(
                            user = %ctx.username,
                            requested_parent_id = %parent_id,
                            placeholder_id = %placeholder.id,
                            "Target parent missing, created placeholder directory"
                        );
                        ParentResolution::Placeholder(placeholder)
                    }
                    Err(e) => {
                        warn!(
                            user = %ctx.username,
                            requested_parent_id = %parent_id,
                            error = %e,
                            "Placeholder creation failed, moving directory to root"
                        );
                        ParentResolution::Demoted
                    }
                },
            },
        };

        directory.reparent(resolution.parent());
        directory.sort_order = sort_order;
        let directory = tx.update(&directory).await?;
        let node = project(&*tx, directory).await?;
        tx.commit().await?;

        info!(
            user = %ctx.username,
            directory_id = %id,
            from_parent_id = ?old_parent_id,
            to_parent_id = ?node.parent_id,
            sort_order,
            "Directory moved"
        );

        Ok(node)
    }

    /// Apply a batch of position updates.
    ///
    /// Entries naming unknown directories are skipped. An entry's parent
    /// is applied only when it exists and would not create a cycle.
    pub async fn reorder(&self, ctx: &RequestContext, entries: &[DirectoryOrder]) -> AppResult<()> {
        let tx = self.backend.begin().await?;
        let mut updated = 0usize;

        for entry in entries {
            let Some(mut directory) = tx.get(entry.id).await? else {
                debug!(directory_id = %entry.id, "Reorder entry skipped: directory not found");
                continue;
            };

            if let Some(parent_id) = entry.parent_id {
                if directory.parent_id != Some(parent_id) {
                    let parent = match tx.get(parent_id).await? {
                        Some(parent) => {
                            if is_within_subtree(&*tx, &parent, directory.id).await? {
                                None
                            } else {
                                Some(parent)
                            }
                        }
                        None => None,
                    };
                    match parent {
                        Some(parent) => directory.reparent(Some(&parent)),
                        None => debug!(
                            directory_id = %entry.id,
                            parent_id = %parent_id,
                            "Reorder entry parent ignored"
                        ),
                    }
                }
            }

            directory.sort_order = entry.sort_order.unwrap_or(DEFAULT_SORT_ORDER);
            tx.update(&directory).await?;
            updated += 1;
        }

        tx.commit().await?;

        info!(
            user = %ctx.username,
            requested = entries.len(),
            updated,
            "Directories reordered"
        );

        Ok(())
    }

    /// Delete `id` and every descendant, children before parents.
    pub async fn delete(&self, ctx: &RequestContext, id: DirectoryId) -> AppResult<()> {
        let tx = self.backend.begin().await?;
        let root = require(&*tx, id).await?;

        // Post-order walk; `visited` stops a corrupted cyclic store from looping.
        let mut order = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![(root.id, false)];
        while let Some((current, expanded)) = stack.pop() {
            if expanded {
                order.push(current);
                continue;
            }
            if !visited.insert(current) {
                continue;
            }
            stack.push((current, true));
            for child in tx.find_children(current).await?.into_iter().rev() {
                stack.push((child.id, false));
            }
        }

        for directory_id in &order {
            tx.delete(*directory_id).await?;
        }
        tx.commit().await?;

        info!(
            user = %ctx.username,
            directory_id = %id,
            deleted = order.len(),
            "Directory deleted"
        );

        Ok(())
    }
}

fn required_name(name: &str) -> AppResult<&str> {
    let name = name.trim();
    validate_name(name)?;
    Ok(name)
}

fn next_after(max: Option<i32>) -> i32 {
    max.map_or(FIRST_SORT_ORDER, |m| m.saturating_add(1))
}

fn placeholder_for(requested: DirectoryId) -> NewDirectory {
    NewDirectory {
        name: format!("Placeholder directory {requested}"),
        path: format!("/placeholder/{requested}"),
        sort_order: FIRST_SORT_ORDER,
        parent_id: None,
    }
}

async fn require<S>(store: &S, id: DirectoryId) -> AppResult<Directory>
where
    S: DirectoryStore + ?Sized,
{
    store
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Directory not found with id: {id}")))
}

/// Whether `candidate` is `id` or lies beneath it.
async fn is_within_subtree<S>(store: &S, candidate: &Directory, id: DirectoryId) -> AppResult<bool>
where
    S: DirectoryStore + ?Sized,
{
    let mut seen = HashSet::new();
    let mut current = Some(candidate.clone());
    while let Some(directory) = current {
        if directory.id == id {
            return Ok(true);
        }
        if !seen.insert(directory.id) {
            return Ok(false);
        }
        current = match directory.parent_id {
            Some(parent_id) => store.get(parent_id).await?,
            None => None,
        };
    }
    Ok(false)
}

pub(crate) async fn project<S>(store: &S, directory: Directory) -> AppResult<DirectoryNode>
where
    S: DirectoryStore + ?Sized,
{
    let has_children = store.has_children(directory.id).await?;
    Ok(DirectoryNode::project(directory, has_children))
}

async fn project_all<S>(store: &S, directories: Vec<Directory>) -> AppResult<Vec<DirectoryNode>>
where
    S: DirectoryStore + ?Sized,
{
    let mut nodes = Vec::with_capacity(directories.len());
    for directory in directories {
        nodes.push(project(store, directory).await?);
    }
    Ok(nodes)
}
