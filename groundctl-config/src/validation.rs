//! Custom validation functions for groundctl settings.

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

static REGION_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[a-z]{2}(-[a-z]+)+-[0-9]$").expect("static regex"));

/// Validate that a region code has the `geo-direction-N` shape.
pub fn validate_region_code(code: &str) -> Result<(), ValidationError> {
    if REGION_CODE.is_match(code) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_region_code"))
    }
}

/// Validate SDK retry mode.
pub fn validate_retry_mode(mode: &str) -> Result<(), ValidationError> {
    match mode {
        "standard" | "adaptive" => Ok(()),
        _ => Err(ValidationError::new("invalid_retry_mode")),
    }
}

/// Validate log level name.
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid = ["trace", "debug", "info", "warn", "error"].contains(&level.to_lowercase().as_str());
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_codes() {
        for ok in ["us-east-1", "ap-northeast-2", "ap-southeast-2", "me-south-1"] {
            assert!(validate_region_code(ok).is_ok(), "{ok}");
        }
        for bad in ["", "us-east", "US-EAST-1", "useast1", "us-east-12"] {
            assert!(validate_region_code(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn retry_modes() {
        assert!(validate_retry_mode("standard").is_ok());
        assert!(validate_retry_mode("adaptive").is_ok());
        assert!(validate_retry_mode("legacy").is_err());
    }

    #[test]
    fn log_levels() {
        assert!(validate_log_level("WARN").is_ok());
        assert!(validate_log_level("verbose").is_err());
    }
}
