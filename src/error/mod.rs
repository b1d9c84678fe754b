//! Error types for the DNS probe.
//!
//! This module defines a hierarchical error system:
//! - [`AppError`]: Top-level application errors
//! - [`ConfigError`]: Configuration errors
//! - [`ResolveError`]: Failures of a single resolution attempt
//! - [`AuditError`]: Audit log errors
//!
//! Resolution errors never escape the probe loop: they are recorded as
//! failed outcomes. Only startup problems surface as [`AppError`].

use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Audit log error.
    #[error("Audit log error: {0}")]
    Audit(#[from] AuditError),

    /// Dashboard output error.
    #[error("Dashboard output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Configuration errors.
///
/// These errors represent failures in configuration loading and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Required configuration is missing.
    #[error("Missing required: {var}")]
    MissingRequired {
        /// The missing variable name.
        var: String,
    },

    /// Configuration value is invalid.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue {
        /// The variable name.
        var: String,
        /// Why the value is invalid.
        reason: String,
    },
}

/// Resolution errors.
///
/// Every variant turns into a failed probe outcome.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The lookup did not finish in time.
    #[error("lookup timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout in milliseconds.
        timeout_ms: u64,
    },

    /// The resolver reported an error.
    #[error("lookup {hostname}: {message}")]
    Lookup {
        /// Hostname that was queried.
        hostname: String,
        /// Resolver message.
        message: String,
    },

    /// The resolver answered without any address.
    #[error("lookup {hostname}: no addresses found")]
    NoAddresses {
        /// Hostname that was queried.
        hostname: String,
    },

    /// The external lookup command could not be started.
    #[error("failed to run {program}: {message}")]
    Spawn {
        /// Program name.
        program: String,
        /// OS error message.
        message: String,
    },

    /// The external lookup command exited unsuccessfully.
    #[error("{program} exited with {status}: {stderr}")]
    CommandFailed {
        /// Program name.
        program: String,
        /// Exit status description.
        status: String,
        /// Trimmed standard error output.
        stderr: String,
    },
}

/// Audit log errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuditError {
    /// Failed to open the log file.
    #[error("failed to open {path}: {message}")]
    Open {
        /// Log file path.
        path: String,
        /// OS error message.
        message: String,
    },

    /// Failed to write or flush a line.
    #[error("failed to write audit line: {message}")]
    Write {
        /// OS error message.
        message: String,
    },

    /// Failed to encode a JSON line.
    #[error("failed to serialize audit record: {message}")]
    Serialize {
        /// Serializer message.
        message: String,
    },
}
