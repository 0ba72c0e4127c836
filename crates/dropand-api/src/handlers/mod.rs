//! Route handlers organized by domain.

pub mod auth;
pub mod directory;
pub mod health;
