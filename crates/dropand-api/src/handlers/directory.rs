//! Directory tree handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use dropand_core::error::{AppError, ErrorKind};
use dropand_entity::directory::{DirectoryNode, DirectoryTreeNode};
use dropand_service::DirectoryOrder;

use crate::dto::request::{
    CreateDirectoryRequest, DirectoryOrderRequest, MoveDirectoryRequest, RenameDirectoryRequest,
    validation_error,
};
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser, parse_directory_id};
use crate::state::AppState;

/// GET /api/directories
/// GET /api/directories/tree
pub async fn list_roots(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<DirectoryNode>>, ApiError> {
    let roots = state.directory_service.list_roots(&auth).await?;
    Ok(Json(roots))
}

/// GET /api/directories/{id}/children
pub async fn list_children(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Vec<DirectoryNode>>, ApiError> {
    let id = parse_directory_id(&id)?;
    let children = state.directory_service.list_children(&auth, id).await?;
    Ok(Json(children))
}

/// GET /api/directories/{id}/tree
pub async fn subtree(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DirectoryTreeNode>, ApiError> {
    let id = parse_directory_id(&id)?;
    let tree = state.tree_service.subtree(&auth, id).await?;
    Ok(Json(tree))
}

/// POST /api/directories
///
/// A missing parent is reported as 400 here, and any server-side failure
/// as 500 with a `Failed to create directory` message.
pub async fn create_directory(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateDirectoryRequest>,
) -> Result<Json<DirectoryNode>, ApiError> {
    let node = state
        .directory_service
        .create(&auth, &req.name, req.parent_id)
        .await
        .map_err(|e| match e.kind {
            ErrorKind::NotFound => AppError::validation(e.message),
            _ if e.is_client_error() => e,
            _ => AppError::internal(format!("Failed to create directory: {}", e.message)),
        })?;

    Ok(Json(node))
}

/// PUT /api/directories/{id}
pub async fn rename_directory(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<RenameDirectoryRequest>,
) -> Result<Json<DirectoryNode>, ApiError> {
    let id = parse_directory_id(&id)?;
    req.validate().map_err(|e| validation_error(&e))?;

    let node = state.directory_service.rename(&auth, id, &req.name).await?;
    Ok(Json(node))
}

/// DELETE /api/directories/{id}
pub async fn delete_directory(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_directory_id(&id)?;
    state.directory_service.delete(&auth, id).await?;
    Ok(StatusCode::OK)
}

/// POST /api/directories/{id}/move
///
/// Without a `sortOrder` the directory goes after its new siblings, and the
/// target parent must exist. The placeholder fallback only applies when the
/// caller supplies a position.
pub async fn move_directory(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<MoveDirectoryRequest>,
) -> Result<StatusCode, ApiError> {
    let id = parse_directory_id(&id)?;
    let sort_order = match req.sort_order {
        Some(sort_order) => sort_order,
        None => {
            if let Some(parent_id) = req.parent_id {
                state
                    .directory_service
                    .get(&auth, parent_id)
                    .await
                    .map_err(|e| match e.kind {
                        ErrorKind::NotFound => AppError::not_found(format!(
                            "Parent directory not found with id: {parent_id}"
                        )),
                        _ => e,
                    })?;
            }
            state.directory_service.next_sort_order(req.parent_id).await?
        }
    };

    state
        .directory_service
        .move_directory(&auth, id, req.parent_id, sort_order)
        .await?;
    Ok(StatusCode::OK)
}

/// PUT /api/directories/order
pub async fn reorder(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(entries): ApiJson<Vec<DirectoryOrderRequest>>,
) -> Result<StatusCode, ApiError> {
    let orders: Vec<DirectoryOrder> = entries
        .into_iter()
        .filter_map(DirectoryOrderRequest::into_order)
        .collect();

    state.directory_service.reorder(&auth, &orders).await?;
    Ok(StatusCode::OK)
}

/// PUT /api/directories/{id}/move
///
/// Single-entry reorder; the path id wins over any id in the body and an
/// unknown id is ignored.
pub async fn reorder_one(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<MoveDirectoryRequest>,
) -> Result<StatusCode, ApiError> {
    let order = DirectoryOrder {
        id: parse_directory_id(&id)?,
        parent_id: req.parent_id,
        sort_order: req.sort_order,
    };

    state.directory_service.reorder(&auth, &[order]).await?;
    Ok(StatusCode::OK)
}
