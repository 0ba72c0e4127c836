//! Response DTOs.

use serde::{Deserialize, Serialize};

/// GET /api/health body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Active store backend.
    pub store: String,
}
