//! Login gate configuration.

use serde::{Deserialize, Serialize};

/// Authentication and session-cookie configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Lifetime of a login session in minutes.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_minutes: u64,
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Path of the login page (GET renders, POST submits).
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Where a successful login lands.
    #[serde(default = "default_success_url")]
    pub default_success_url: String,
    /// Accounts allowed to log in. Empty seeds the default administrator.
    #[serde(default)]
    pub users: Vec<UserConfig>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            session_ttl_minutes: default_session_ttl(),
            cookie_name: default_cookie_name(),
            login_path: default_login_path(),
            default_success_url: default_success_url(),
            users: Vec::new(),
        }
    }
}

/// A configured login account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// Login name.
    pub username: String,
    /// Argon2id PHC string (see `dropand-cli hash-password`).
    pub password_hash: String,
    /// Role name: `admin` or `user`.
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_session_ttl() -> u64 {
    8 * 60
}

fn default_cookie_name() -> String {
    "DROPAND_SESSION".to_string()
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_success_url() -> String {
    "/html5/index.html".to_string()
}

fn default_role() -> String {
    "user".to_string()
}
