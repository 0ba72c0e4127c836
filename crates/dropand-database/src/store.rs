//! Directory store contract.
//!
//! Every logical directory operation runs inside one
//! [`DirectoryTransaction`] obtained from a [`DirectoryBackend`]. Work is
//! made durable by [`DirectoryTransaction::commit`]; dropping the
//! transaction instead discards everything it did.

use std::fmt::Debug;

use async_trait::async_trait;

use dropand_core::result::AppResult;
use dropand_core::types::DirectoryId;
use dropand_entity::directory::{Directory, NewDirectory};

/// Queries and mutations over directory rows.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Find a directory by id.
    async fn get(&self, id: DirectoryId) -> AppResult<Option<Directory>>;

    /// Direct children of `parent_id`, ascending by sort order.
    async fn find_children(&self, parent_id: DirectoryId) -> AppResult<Vec<Directory>>;

    /// Root directories, ascending by sort order.
    async fn find_roots(&self) -> AppResult<Vec<Directory>>;

    /// Whether any directory lists `id` as its parent.
    async fn has_children(&self, id: DirectoryId) -> AppResult<bool>;

    /// Highest sort order in a sibling group (`None` selects the roots).
    async fn max_sort_order(&self, parent_id: Option<DirectoryId>) -> AppResult<Option<i32>>;

    /// Insert a new directory and return it with its assigned id.
    async fn insert(&self, data: &NewDirectory) -> AppResult<Directory>;

    /// Persist every mutable column of an existing directory.
    async fn update(&self, directory: &Directory) -> AppResult<Directory>;

    /// Delete a single row. Returns `true` if it existed.
    async fn delete(&self, id: DirectoryId) -> AppResult<bool>;
}

/// One atomic unit of work.
#[async_trait]
pub trait DirectoryTransaction: DirectoryStore {
    /// Make all changes durable.
    async fn commit(self: Box<Self>) -> AppResult<()>;
}

/// A source of directory transactions.
#[async_trait]
pub trait DirectoryBackend: Send + Sync + Debug + 'static {
    /// Start a unit of work.
    async fn begin(&self) -> AppResult<Box<dyn DirectoryTransaction>>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Short name for logs and health output.
    fn name(&self) -> &'static str;
}
