//! HTTP integration tests, driven through the full router against the
//! in-memory store.

mod auth_test;
mod directory_test;
mod helpers;
