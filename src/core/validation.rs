//! Input validation for homelab operations.
//!
//! Validates env key names and configured default values.

use crate::core::constants::PLACEHOLDER_PREFIX;
use crate::error::{ConfigError, Result, ValidationError};

/// Validate an env key name.
///
/// Keys must be valid environment variable names:
/// - Only A-Z, a-z, 0-9, and underscore
/// - Cannot start with a digit
/// - Cannot be empty
///
/// # Errors
///
/// Returns `ValidationError` if the key is invalid.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(ValidationError::EmptyKey.into());
    }

    if key.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidKey {
            key: key.to_string(),
            reason: "cannot start with a digit".to_string(),
        }
        .into());
    }

    for (i, ch) in key.chars().enumerate() {
        if !ch.is_ascii_alphanumeric() && ch != '_' {
            return Err(ValidationError::InvalidKey {
                key: key.to_string(),
                reason: format!(
                    "invalid character '{}' at position {}. Only A-Z, 0-9, and underscore are allowed",
                    ch,
                    i + 1
                ),
            }
            .into());
        }
    }

    Ok(())
}

/// Validate a fixed default value.
///
/// A default that is empty or starts with `CHANGEME` would be treated as a
/// placeholder on the next run and rewritten forever.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if the value looks unset.
pub fn validate_fixed_value(field: &str, value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.starts_with(PLACEHOLDER_PREFIX) {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("default must not be empty or start with {}", PLACEHOLDER_PREFIX),
        }
        .into());
    }

    Ok(())
}
