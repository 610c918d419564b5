//! Structural checks on upload candidates.
//!
//! Checks run in a fixed order (name, then size presence, then size sign) and
//! stop at the first failure, so a candidate with several problems reports only
//! the first one.

use super::models::FileCandidate;

pub const NAME_MISSING: &str = "file name is missing";
pub const SIZE_MISSING: &str = "file size is missing";
pub const SIZE_NEGATIVE: &str = "file size is negative";

/// Outcome of [`validate`]. `reason` is set exactly when `valid` is false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidityReport {
    pub valid: bool,
    pub reason: Option<String>,
}

impl ValidityReport {
    fn ok() -> Self {
        Self { valid: true, reason: None }
    }

    fn fail(reason: &str) -> Self {
        Self {
            valid: false,
            reason: Some(reason.to_string()),
        }
    }
}

pub fn validate(candidate: &FileCandidate) -> ValidityReport {
    if candidate.name.as_deref().is_none_or(|name| name.trim().is_empty()) {
        return ValidityReport::fail(NAME_MISSING);
    }
    match candidate.size {
        None => ValidityReport::fail(SIZE_MISSING),
        Some(size) if size < 0 => ValidityReport::fail(SIZE_NEGATIVE),
        Some(_) => ValidityReport::ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: Option<&str>, size: Option<i64>) -> FileCandidate {
        FileCandidate {
            name: name.map(str::to_string),
            size,
            tags: None,
        }
    }

    #[test]
    fn test_valid_candidate() {
        let report = validate(&candidate(Some("file1.txt"), Some(0)));
        assert!(report.valid);
        assert_eq!(report.reason, None);
    }

    #[test]
    fn test_blank_names_rejected() {
        for name in [None, Some(""), Some("   "), Some("\t\n")] {
            let report = validate(&candidate(name, Some(10)));
            assert!(!report.valid, "name {name:?} should be rejected");
            assert_eq!(report.reason.as_deref(), Some(NAME_MISSING));
        }
    }

    #[test]
    fn test_missing_size_rejected() {
        let report = validate(&candidate(Some("a.txt"), None));
        assert!(!report.valid);
        assert_eq!(report.reason.as_deref(), Some(SIZE_MISSING));
    }

    #[test]
    fn test_negative_size_rejected() {
        let report = validate(&candidate(Some("a.txt"), Some(-1)));
        assert!(!report.valid);
        assert_eq!(report.reason.as_deref(), Some(SIZE_NEGATIVE));
    }

    #[test]
    fn test_name_checked_before_size() {
        assert_eq!(validate(&candidate(Some(""), None)).reason.as_deref(), Some(NAME_MISSING));
        assert_eq!(validate(&candidate(None, Some(-5))).reason.as_deref(), Some(NAME_MISSING));
    }
}
