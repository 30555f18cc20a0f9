//! Custom validation functions for configuration.

use validator::ValidationError;

/// Every value `max_log_level` may take. Matching is by value and case sensitive.
pub const LEVEL_CODES: [&str; 6] = ["V", "D", "I", "W", "E", "NONE"];

/// Validate that a configured ceiling is one of [`LEVEL_CODES`].
pub fn validate_max_log_level(level: &str) -> Result<(), ValidationError> {
    if LEVEL_CODES.contains(&level) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_log_level");
        err.message = Some(format!("`{level}` is not one of V, D, I, W, E, NONE").into());
        Err(err)
    }
}

/// Validate that a subscriber filter directive is not blank.
pub fn validate_filter(filter: &str) -> Result<(), ValidationError> {
    if filter.trim().is_empty() {
        Err(ValidationError::new("empty_filter"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_level_code() {
        for code in LEVEL_CODES {
            assert!(validate_max_log_level(code).is_ok(), "{code} rejected");
        }
    }

    #[test]
    fn rejects_lowercase_and_long_names() {
        assert!(validate_max_log_level("d").is_err());
        assert!(validate_max_log_level("DEBUG").is_err());
        assert!(validate_max_log_level("none").is_err());
        assert!(validate_max_log_level("").is_err());
    }

    #[test]
    fn blank_filter_is_rejected() {
        assert!(validate_filter("  ").is_err());
        assert!(validate_filter("loggate=trace").is_ok());
    }
}
