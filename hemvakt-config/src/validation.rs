//! Custom validation functions for configuration.

use validator::ValidationError;

/// Accepts `tracing` filter directives such as `info` or
/// `hemvakt_core=debug,warn`.
pub fn validate_log_filter(filter: &str) -> Result<(), ValidationError> {
    let re = regex::Regex::new(
        r"^(?:[A-Za-z0-9_:\-]+(?:=(?:trace|debug|info|warn|error|off))?)(?:,(?:[A-Za-z0-9_:\-]+(?:=(?:trace|debug|info|warn|error|off))?))*$",
    )
    .map_err(|_| ValidationError::new("invalid_regex"))?;

    if re.is_match(filter) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_filter"))
    }
}

/// Rejects names made only of whitespace.
pub fn validate_not_blank(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}
