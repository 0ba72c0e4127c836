//! Configured login accounts.

use std::collections::HashMap;

use tracing::warn;

use dropand_core::config::UserConfig;
use dropand_core::error::AppError;
use dropand_entity::user::UserRole;

use crate::password::PasswordHasher;

/// Username and password of the account seeded when none are configured.
pub const DEFAULT_ADMIN: (&str, &str) = ("admin", "admin");

/// A login account.
#[derive(Debug, Clone)]
pub struct Account {
    /// Login name.
    pub username: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    /// Granted role.
    pub role: UserRole,
}

/// Lookup table of accounts keyed by username.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    accounts: HashMap<String, Account>,
}

impl UserDirectory {
    /// Build the table from configuration.
    ///
    /// An empty list seeds the default administrator.
    pub fn from_config(users: &[UserConfig], hasher: &PasswordHasher) -> Result<Self, AppError> {
        let mut accounts = HashMap::new();

        if users.is_empty() {
            let (username, password) = DEFAULT_ADMIN;
            warn!(
                username,
                "No login accounts configured; seeding the default administrator"
            );
            accounts.insert(
                username.to_string(),
                Account {
                    username: username.to_string(),
                    password_hash: hasher.hash_password(password)?,
                    role: UserRole::Admin,
                },
            );
        }

        for user in users {
            let username = user.username.trim();
            if username.is_empty() {
                return Err(AppError::configuration("Configured username is blank"));
            }
            let role = user.role.parse::<UserRole>().map_err(|e| {
                AppError::configuration(format!("Account '{username}': {}", e.message))
            })?;
            let account = Account {
                username: username.to_string(),
                password_hash: user.password_hash.clone(),
                role,
            };
            if accounts.insert(account.username.clone(), account).is_some() {
                return Err(AppError::configuration(format!(
                    "Duplicate account '{username}'"
                )));
            }
        }

        Ok(Self { accounts })
    }

    /// Find an account by username.
    pub fn find(&self, username: &str) -> Option<&Account> {
        self.accounts.get(username)
    }

    /// Number of accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether there are no accounts.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
