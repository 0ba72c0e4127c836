//! In-memory directory store.
//!
//! A transaction holds the backend lock for its whole lifetime and works on
//! a private copy of the rows, so transactions are serialized and a dropped
//! transaction leaves the committed state untouched.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use dropand_core::error::AppError;
use dropand_core::result::AppResult;
use dropand_core::types::DirectoryId;
use dropand_entity::directory::{Directory, NewDirectory};

use crate::store::{DirectoryBackend, DirectoryStore, DirectoryTransaction};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    last_id: i64,
    rows: BTreeMap<DirectoryId, Directory>,
}

impl MemoryState {
    fn sorted_where(&self, parent_id: Option<DirectoryId>) -> Vec<Directory> {
        let mut rows: Vec<Directory> = self
            .rows
            .values()
            .filter(|d| d.parent_id == parent_id)
            .cloned()
            .collect();
        rows.sort_by_key(|d| (d.sort_order, d.id));
        rows
    }
}

/// Process-local directory backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryDirectoryBackend {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DirectoryBackend for MemoryDirectoryBackend {
    async fn begin(&self) -> AppResult<Box<dyn DirectoryTransaction>> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryDirectoryTransaction {
            guard,
            working: std::sync::Mutex::new(working),
        }))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Exclusive unit of work over a [`MemoryDirectoryBackend`].
#[derive(Debug)]
pub struct MemoryDirectoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    working: std::sync::Mutex<MemoryState>,
}

impl MemoryDirectoryTransaction {
    fn with_state<R>(&self, f: impl FnOnce(&mut MemoryState) -> R) -> AppResult<R> {
        let mut state = self
            .working
            .lock()
            .map_err(|_| AppError::internal("In-memory directory store lock poisoned"))?;
        Ok(f(&mut state))
    }
}

#[async_trait]
impl DirectoryStore for MemoryDirectoryTransaction {
    async fn get(&self, id: DirectoryId) -> AppResult<Option<Directory>> {
        self.with_state(|s| s.rows.get(&id).cloned())
    }

    async fn find_children(&self, parent_id: DirectoryId) -> AppResult<Vec<Directory>> {
        self.with_state(|s| s.sorted_where(Some(parent_id)))
    }

    async fn find_roots(&self) -> AppResult<Vec<Directory>> {
        self.with_state(|s| s.sorted_where(None))
    }

    async fn has_children(&self, id: DirectoryId) -> AppResult<bool> {
        self.with_state(|s| s.rows.values().any(|d| d.parent_id == Some(id)))
    }

    async fn max_sort_order(&self, parent_id: Option<DirectoryId>) -> AppResult<Option<i32>> {
        self.with_state(|s| {
            s.rows
                .values()
                .filter(|d| d.parent_id == parent_id)
                .map(|d| d.sort_order)
                .max()
        })
    }

    async fn insert(&self, data: &NewDirectory) -> AppResult<Directory> {
        data.validate()?;

        self.with_state(|s| {
            if let Some(parent_id) = data.parent_id {
                if !s.rows.contains_key(&parent_id) {
                    return Err(AppError::not_found(format!(
                        "Parent directory not found with id: {parent_id}"
                    )));
                }
            }

            s.last_id += 1;
            let directory = Directory {
                id: DirectoryId::new(s.last_id),
                name: data.name.clone(),
                path: data.path.clone(),
                sort_order: data.sort_order,
                parent_id: data.parent_id,
            };
            s.rows.insert(directory.id, directory.clone());
            Ok(directory)
        })?
    }

    async fn update(&self, directory: &Directory) -> AppResult<Directory> {
        directory.validate()?;

        self.with_state(|s| {
            if let Some(parent_id) = directory.parent_id {
                if !s.rows.contains_key(&parent_id) {
                    return Err(AppError::not_found(format!(
                        "Parent directory not found with id: {parent_id}"
                    )));
                }
            }

            match s.rows.get_mut(&directory.id) {
                Some(row) => {
                    *row = directory.clone();
                    Ok(row.clone())
                }
                None => Err(AppError::not_found(format!(
                    "Directory {} not found",
                    directory.id
                ))),
            }
        })?
    }

    async fn delete(&self, id: DirectoryId) -> AppResult<bool> {
        self.with_state(|s| {
            if s.rows.values().any(|d| d.parent_id == Some(id)) {
                return Err(AppError::conflict(format!(
                    "Directory {id} still has children"
                )));
            }
            Ok(s.rows.remove(&id).is_some())
        })?
    }
}

#[async_trait]
impl DirectoryTransaction for MemoryDirectoryTransaction {
    async fn commit(self: Box<Self>) -> AppResult<()> {
        let MemoryDirectoryTransaction { mut guard, working } = *self;
        *guard = working
            .into_inner()
            .map_err(|_| AppError::internal("In-memory directory store lock poisoned"))?;
        Ok(())
    }
}
