//! # dropand-auth
//!
//! Authentication for the DropAnd login gate.
//!
//! ## Modules
//!
//! - `jwt`: session token claims, signing, and validation
//! - `password`: Argon2id password hashing
//! - `users`: the configured account list
//! - `authenticator`: credential checks that issue session tokens

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod users;

pub use authenticator::{Authenticator, LoginOutcome};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
pub use users::{Account, UserDirectory};
