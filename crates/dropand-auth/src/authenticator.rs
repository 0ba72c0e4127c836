//! Credential checks for the form login.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use dropand_core::config::AuthConfig;
use dropand_core::error::AppError;
use dropand_entity::user::UserRole;

use crate::jwt::{Claims, JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;
use crate::users::UserDirectory;

const BAD_CREDENTIALS: &str = "Bad credentials";

/// A successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Signed session token.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
    /// Authenticated username.
    pub username: String,
    /// Granted role.
    pub role: UserRole,
}

/// Verifies credentials and session tokens.
#[derive(Debug, Clone)]
pub struct Authenticator {
    users: UserDirectory,
    hasher: PasswordHasher,
    encoder: JwtEncoder,
    decoder: JwtDecoder,
}

impl Authenticator {
    /// Build from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        if config.jwt_secret == "CHANGE_ME_IN_PRODUCTION" {
            warn!("auth.jwt_secret is the built-in default; set a real secret");
        }

        let hasher = PasswordHasher::new();
        let users = UserDirectory::from_config(&config.users, &hasher)?;

        Ok(Self {
            users,
            hasher,
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
        })
    }

    /// Check a username/password pair and issue a session token.
    pub fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let username = username.trim();
        let Some(account) = self.users.find(username) else {
            warn!(username, "Login failed: unknown user");
            return Err(AppError::authentication(BAD_CREDENTIALS));
        };

        if !self.hasher.verify_password(password, &account.password_hash)? {
            warn!(username, "Login failed: wrong password");
            return Err(AppError::authentication(BAD_CREDENTIALS));
        }

        let (token, expires_at) = self.encoder.issue(&account.username, account.role)?;
        info!(username, role = %account.role, "User logged in");

        Ok(LoginOutcome {
            token,
            expires_at,
            username: account.username.clone(),
            role: account.role,
        })
    }

    /// Validate a session token.
    ///
    /// Tokens naming an account that is no longer configured are rejected.
    pub fn authenticate(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decoder.decode(token)?;
        if self.users.find(claims.username()).is_none() {
            return Err(AppError::authentication("Account no longer exists"));
        }
        Ok(claims)
    }
}
