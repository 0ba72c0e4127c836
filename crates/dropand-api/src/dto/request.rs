//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use dropand_core::error::AppError;
use dropand_core::types::DirectoryId;
use dropand_service::DirectoryOrder;

/// POST /api/directories body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDirectoryRequest {
    /// Directory name; blank is rejected by the service.
    #[serde(default)]
    pub name: String,
    /// Parent directory, absent for a root.
    pub parent_id: Option<DirectoryId>,
}

/// PUT /api/directories/{id} body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RenameDirectoryRequest {
    /// New name.
    #[serde(default)]
    #[validate(length(min = 1, message = "Directory name is required"))]
    pub name: String,
}

/// Body of both move endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveDirectoryRequest {
    /// Target parent, absent to move to the roots.
    pub parent_id: Option<DirectoryId>,
    /// Target position; computed when absent.
    pub sort_order: Option<i32>,
}

/// One element of the PUT /api/directories/order array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryOrderRequest {
    /// Directory to reposition; entries without one are skipped.
    pub id: Option<DirectoryId>,
    /// New parent.
    pub parent_id: Option<DirectoryId>,
    /// New position.
    pub sort_order: Option<i32>,
}

impl DirectoryOrderRequest {
    /// The service-level entry, if the request names a directory.
    pub fn into_order(self) -> Option<DirectoryOrder> {
        Some(DirectoryOrder {
            id: self.id?,
            parent_id: self.parent_id,
            sort_order: self.sort_order,
        })
    }
}

/// Login form fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginForm {
    /// Username.
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Flags shown on the login page after a redirect.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginPageQuery {
    /// Present after a failed login.
    pub error: Option<String>,
    /// Present after logging out.
    pub logout: Option<String>,
}

/// Flatten validator output into one `Validation` error.
pub fn validation_error(errors: &ValidationErrors) -> AppError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    AppError::validation(messages.join("; "))
}
