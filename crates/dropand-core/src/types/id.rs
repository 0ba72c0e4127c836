//! Typed identifier for directory nodes.
//!
//! Directory ids are store-assigned 64-bit integers (`BIGSERIAL` in
//! PostgreSQL). Wrapping them keeps a directory id from being mixed up with
//! a sort position or any other integer. With the `sqlx` feature the wrapper
//! is transparent to the database driver.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unique identifier for a directory node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
#[serde(transparent)]
pub struct DirectoryId(pub i64);

impl DirectoryId {
    /// Wrap a raw store id.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Return the raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for DirectoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DirectoryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

impl From<i64> for DirectoryId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<DirectoryId> for i64 {
    fn from(id: DirectoryId) -> i64 {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let id = DirectoryId::new(42);
        assert_eq!(id.to_string(), "42");
        let parsed: DirectoryId = " 42 ".parse().expect("should parse");
        assert_eq!(parsed, id);
        assert!("abc".parse::<DirectoryId>().is_err());
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        let json = serde_json::to_string(&DirectoryId::new(7)).expect("serialize");
        assert_eq!(json, "7");
        let parsed: DirectoryId = serde_json::from_str("7").expect("deserialize");
        assert_eq!(parsed.get(), 7);
    }
}
