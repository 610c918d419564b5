//! Common type definitions.
//!
//! # ID Types
//!
//! - [`FileId`]: File record identifier. Assigned by the backend on first save
//!   (a UUID rendered as a string) and immutable afterwards. Kept as a plain
//!   string so that lookups with an unknown or malformed id resolve to
//!   "not found" rather than a parse failure.
//!
//! # Utility Functions
//!
//! - [`abbrev_id`]: Abbreviate ids to their first 8 chars for logging

pub type FileId = String;

/// Abbreviate an id to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_id(id: &str) -> String {
    id.chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbrev_id() {
        assert_eq!(abbrev_id("550e8400-e29b-41d4-a716-446655440000"), "550e8400");
        assert_eq!(abbrev_id("id0"), "id0");
    }
}
