//! Request context carrying the acting user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dropand_entity::user::UserRole;

/// Who is performing the current operation.
///
/// Built from the session token by the API layer, or by the CLI for
/// local administration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Acting username.
    pub username: String,
    /// Role granted at login.
    pub role: UserRole,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for `username`.
    pub fn new(username: impl Into<String>, role: UserRole) -> Self {
        Self {
            username: username.into(),
            role,
            request_time: Utc::now(),
        }
    }

    /// Context for local administrative tooling.
    pub fn system() -> Self {
        Self::new("system", UserRole::Admin)
    }

    /// Whether the acting user is an administrator.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
