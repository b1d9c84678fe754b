//! Configuration validation.
//!
//! This module provides validation logic for configuration values,
//! ensuring they are within acceptable ranges.

use super::{Config, HOSTNAME_VAR};
use crate::error::ConfigError;

/// Minimum allowed probe interval in milliseconds.
pub const MIN_INTERVAL_MS: u64 = 1;

/// Maximum allowed probe interval in milliseconds (1 minute).
pub const MAX_INTERVAL_MS: u64 = 60_000;

/// Minimum allowed probe timeout in milliseconds.
pub const MIN_TIMEOUT_MS: u64 = 100;

/// Maximum allowed probe timeout in milliseconds (1 minute).
pub const MAX_TIMEOUT_MS: u64 = 60_000;

/// Maximum allowed history size.
pub const MAX_MAX_RECORDS: usize = 1_000_000;

/// Validate configuration values.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if any value is out of range:
/// - `DNS_HOSTNAME` must not be empty or contain whitespace
/// - `PROBE_INTERVAL_MS` must be between 1 and 60000
/// - `PROBE_TIMEOUT_MS` must be between 100 and 60000
/// - `MAX_RECORDS` must be between 1 and 1000000
/// - `DNS_LOOKUP_COMMAND` must not be empty
#[must_use = "validation result should be checked"]
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.hostname.is_empty() {
        return Err(ConfigError::InvalidValue {
            var: HOSTNAME_VAR.into(),
            reason: "must not be empty".into(),
        });
    }

    if config.hostname.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidValue {
            var: HOSTNAME_VAR.into(),
            reason: "must not contain whitespace".into(),
        });
    }

    if !(MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&config.probe_interval_ms) {
        return Err(ConfigError::InvalidValue {
            var: "PROBE_INTERVAL_MS".into(),
            reason: format!("must be between {MIN_INTERVAL_MS} and {MAX_INTERVAL_MS} ms"),
        });
    }

    if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&config.probe_timeout_ms) {
        return Err(ConfigError::InvalidValue {
            var: "PROBE_TIMEOUT_MS".into(),
            reason: format!("must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS} ms"),
        });
    }

    if !(1..=MAX_MAX_RECORDS).contains(&config.max_records) {
        return Err(ConfigError::InvalidValue {
            var: "MAX_RECORDS".into(),
            reason: format!("must be between 1 and {MAX_MAX_RECORDS}"),
        });
    }

    if config.lookup_command.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            var: "DNS_LOOKUP_COMMAND".into(),
            reason: "must not be empty".into(),
        });
    }

    Ok(())
}
