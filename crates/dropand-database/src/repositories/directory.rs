//! Directory repository implementation.

use async_trait::async_trait;
use sqlx::{Connection, PgPool, Postgres, Transaction};
use tokio::sync::Mutex;
use tracing::debug;

use dropand_core::error::{AppError, ErrorKind};
use dropand_core::result::AppResult;
use dropand_core::types::DirectoryId;
use dropand_entity::directory::{Directory, NewDirectory};

use crate::store::{DirectoryBackend, DirectoryStore, DirectoryTransaction};

/// Repository for directory rows and tree queries.
#[derive(Debug, Clone)]
pub struct DirectoryRepository {
    pool: PgPool,
}

impl DirectoryRepository {
    /// Create a new directory repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Return a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DirectoryBackend for DirectoryRepository {
    async fn begin(&self) -> AppResult<Box<dyn DirectoryTransaction>> {
        let tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;
        Ok(Box::new(PgDirectoryTransaction { tx: Mutex::new(tx) }))
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}

/// A PostgreSQL transaction scoped to one directory operation.
///
/// Rolled back by sqlx when dropped without [`DirectoryTransaction::commit`].
pub struct PgDirectoryTransaction {
    tx: Mutex<Transaction<'static, Postgres>>,
}

impl std::fmt::Debug for PgDirectoryTransaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgDirectoryTransaction").finish_non_exhaustive()
    }
}

#[async_trait]
impl DirectoryStore for PgDirectoryTransaction {
    async fn get(&self, id: DirectoryId) -> AppResult<Option<Directory>> {
        let mut tx = self.tx.lock().await;
        sqlx::query_as::<_, Directory>(
            "SELECT id, name, path, sort_order, parent_id FROM directories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find directory", e))
    }

    async fn find_children(&self, parent_id: DirectoryId) -> AppResult<Vec<Directory>> {
        let mut tx = self.tx.lock().await;
        sqlx::query_as::<_, Directory>(
            "SELECT id, name, path, sort_order, parent_id FROM directories \
             WHERE parent_id = $1 ORDER BY sort_order ASC, id ASC",
        )
        .bind(parent_id)
        .fetch_all(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list children", e))
    }

    async fn find_roots(&self) -> AppResult<Vec<Directory>> {
        let mut tx = self.tx.lock().await;
        sqlx::query_as::<_, Directory>(
            "SELECT id, name, path, sort_order, parent_id FROM directories \
             WHERE parent_id IS NULL ORDER BY sort_order ASC, id ASC",
        )
        .fetch_all(&mut **tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list root directories", e)
        })
    }

    async fn has_children(&self, id: DirectoryId) -> AppResult<bool> {
        let mut tx = self.tx.lock().await;
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM directories WHERE parent_id = $1)",
        )
        .bind(id)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check children", e))
    }

    async fn max_sort_order(&self, parent_id: Option<DirectoryId>) -> AppResult<Option<i32>> {
        let mut tx = self.tx.lock().await;
        sqlx::query_scalar::<_, Option<i32>>(
            "SELECT MAX(sort_order) FROM directories WHERE parent_id IS NOT DISTINCT FROM $1",
        )
        .bind(parent_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to read max sort order", e)
        })
    }

    async fn insert(&self, data: &NewDirectory) -> AppResult<Directory> {
        data.validate()?;

        let mut tx = self.tx.lock().await;

        // A savepoint keeps the outer transaction usable if this insert fails.
        let mut savepoint = (&mut **tx).begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to open savepoint", e)
        })?;

        let directory = sqlx::query_as::<_, Directory>(
            "INSERT INTO directories (name, path, sort_order, parent_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, name, path, sort_order, parent_id",
        )
        .bind(&data.name)
        .bind(&data.path)
        .bind(data.sort_order)
        .bind(data.parent_id)
        .fetch_one(&mut *savepoint)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found(format!(
                    "Parent directory not found with id: {}",
                    data.parent_id.map(|p| p.to_string()).unwrap_or_default()
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create directory", e),
        })?;

        savepoint.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to release savepoint", e)
        })?;

        debug!(directory_id = %directory.id, "Inserted directory row");
        Ok(directory)
    }

    async fn update(&self, directory: &Directory) -> AppResult<Directory> {
        directory.validate()?;

        let mut tx = self.tx.lock().await;
        sqlx::query_as::<_, Directory>(
            "UPDATE directories SET name = $2, path = $3, sort_order = $4, parent_id = $5 \
             WHERE id = $1 RETURNING id, name, path, sort_order, parent_id",
        )
        .bind(directory.id)
        .bind(&directory.name)
        .bind(&directory.path)
        .bind(directory.sort_order)
        .bind(directory.parent_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update directory", e))?
        .ok_or_else(|| AppError::not_found(format!("Directory {} not found", directory.id)))
    }

    async fn delete(&self, id: DirectoryId) -> AppResult<bool> {
        let mut tx = self.tx.lock().await;
        let result = sqlx::query("DELETE FROM directories WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete directory", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl DirectoryTransaction for PgDirectoryTransaction {
    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx.into_inner().commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }
}
