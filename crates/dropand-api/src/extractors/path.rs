//! Typed path parameter helpers.

use dropand_core::error::AppError;
use dropand_core::types::DirectoryId;

/// Parses a directory id from a path segment.
pub fn parse_directory_id(s: &str) -> Result<DirectoryId, AppError> {
    s.parse::<DirectoryId>()
        .map_err(|_| AppError::validation(format!("Invalid directory id: {s}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_directory_id() {
        assert_eq!(parse_directory_id("12").unwrap(), DirectoryId::new(12));
        assert!(parse_directory_id("abc").is_err());
    }
}
