//! Core type definitions used across the DropAnd workspace.

pub mod id;

pub use id::DirectoryId;
