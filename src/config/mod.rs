//! Configuration management.
//!
//! This module handles:
//! - Environment variable loading (including an optional `.env` file)
//! - Configuration validation
//! - Default value handling
//!
//! # Example
//!
//! ```
//! use dns_probe::config::{AuditFormat, Config, ResolverStrategy};
//!
//! // Create a config directly (use Config::from_env() in production)
//! let config = Config {
//!     hostname: "example.com".to_string(),
//!     log_level: "warn".to_string(),
//!     log_file: "dns_results.log".to_string(),
//!     log_format: AuditFormat::Text,
//!     probe_interval_ms: 50,
//!     probe_timeout_ms: 5000,
//!     max_records: 10_000,
//!     resolver: ResolverStrategy::System,
//!     lookup_command: "dig +short".to_string(),
//! };
//!
//! assert_eq!(config.probe_interval().as_millis(), 50);
//! ```

mod validation;

pub use validation::{
    validate_config, MAX_INTERVAL_MS, MAX_MAX_RECORDS, MAX_TIMEOUT_MS, MIN_INTERVAL_MS,
    MIN_TIMEOUT_MS,
};

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable holding the hostname to probe.
pub const HOSTNAME_VAR: &str = "DNS_HOSTNAME";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Default audit log path.
pub const DEFAULT_LOG_FILE: &str = "dns_results.log";

/// Default pause between probes in milliseconds.
pub const DEFAULT_PROBE_INTERVAL_MS: u64 = 50;

/// Default per-probe timeout in milliseconds.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5_000;

/// Default cap on the number of records kept for percentiles.
pub const DEFAULT_MAX_RECORDS: usize = 10_000;

/// Default command line for the external lookup strategy.
pub const DEFAULT_LOOKUP_COMMAND: &str = "dig +short";

/// How a hostname gets resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolverStrategy {
    /// The operating system resolver.
    #[default]
    System,
    /// An external lookup tool such as `dig`.
    Command,
}

impl FromStr for ResolverStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "system" => Ok(Self::System),
            "command" => Ok(Self::Command),
            other => Err(format!("unknown resolver '{other}', expected system or command")),
        }
    }
}

impl fmt::Display for ResolverStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::Command => write!(f, "command"),
        }
    }
}

/// Line format of the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuditFormat {
    /// Human readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl FromStr for AuditFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}', expected text or json")),
        }
    }
}

/// Application configuration.
///
/// Use [`Config::from_env`] to load configuration from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Hostname to resolve on every cycle.
    pub hostname: String,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: String,
    /// Audit log path.
    pub log_file: String,
    /// Audit log line format.
    pub log_format: AuditFormat,
    /// Pause between probes in milliseconds.
    pub probe_interval_ms: u64,
    /// Per-probe timeout in milliseconds.
    pub probe_timeout_ms: u64,
    /// Maximum number of records kept in history.
    pub max_records: usize,
    /// Resolution strategy.
    pub resolver: ResolverStrategy,
    /// Command line used by [`ResolverStrategy::Command`].
    pub lookup_command: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `DNS_HOSTNAME`: hostname to probe
    ///
    /// Optional environment variables (with defaults):
    /// - `LOG_LEVEL`: Logging level (default: `warn`)
    /// - `DNS_LOG_FILE`: Audit log path (default: `dns_results.log`)
    /// - `DNS_LOG_FORMAT`: `text` or `json` (default: `text`)
    /// - `PROBE_INTERVAL_MS`: Pause between probes (default: `50`)
    /// - `PROBE_TIMEOUT_MS`: Per-probe timeout (default: `5000`)
    /// - `MAX_RECORDS`: History size cap (default: `10000`)
    /// - `DNS_RESOLVER`: `system` or `command` (default: `system`)
    /// - `DNS_LOOKUP_COMMAND`: Lookup command line (default: `dig +short`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - `DNS_HOSTNAME` is missing
    /// - A numeric or enum variable cannot be parsed
    /// - Any value fails validation (see [`validate_config`])
    #[must_use = "configuration should be used"]
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let hostname = std::env::var(HOSTNAME_VAR).map_err(|_| ConfigError::MissingRequired {
            var: HOSTNAME_VAR.into(),
        })?;

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into());
        let log_file = std::env::var("DNS_LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.into());
        let log_format = parse_env_enum("DNS_LOG_FORMAT", AuditFormat::default())?;

        let probe_interval_ms = parse_env_u64("PROBE_INTERVAL_MS", DEFAULT_PROBE_INTERVAL_MS)?;
        let probe_timeout_ms = parse_env_u64("PROBE_TIMEOUT_MS", DEFAULT_PROBE_TIMEOUT_MS)?;
        let max_records = parse_env_usize("MAX_RECORDS", DEFAULT_MAX_RECORDS)?;

        let resolver = parse_env_enum("DNS_RESOLVER", ResolverStrategy::default())?;
        let lookup_command = std::env::var("DNS_LOOKUP_COMMAND")
            .unwrap_or_else(|_| DEFAULT_LOOKUP_COMMAND.into());

        let config = Self {
            hostname: hostname.trim().to_string(),
            log_level,
            log_file,
            log_format,
            probe_interval_ms,
            probe_timeout_ms,
            max_records,
            resolver,
            lookup_command,
        };

        validate_config(&config)?;
        Ok(config)
    }

    /// Pause between probes.
    #[must_use]
    pub const fn probe_interval(&self) -> Duration {
        Duration::from_millis(self.probe_interval_ms)
    }

    /// Per-probe timeout.
    #[must_use]
    pub const fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

/// Parse an environment variable as u64, using a default if not set.
fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    std::env::var(name).map_or(Ok(default), |val| {
        val.trim().parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be a positive integer".into(),
        })
    })
}

/// Parse an environment variable as usize, using a default if not set.
fn parse_env_usize(name: &str, default: usize) -> Result<usize, ConfigError> {
    std::env::var(name).map_or(Ok(default), |val| {
        val.trim().parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be a positive integer".into(),
        })
    })
}

/// Parse an environment variable through [`FromStr`], using a default if not set.
fn parse_env_enum<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr<Err = String>,
{
    std::env::var(name).map_or(Ok(default), |val| {
        val.parse().map_err(|reason| ConfigError::InvalidValue {
            var: name.into(),
            reason,
        })
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    /// Helper to set up a clean test environment.
    fn setup_test_env() {
        for var in [
            HOSTNAME_VAR,
            "LOG_LEVEL",
            "DNS_LOG_FILE",
            "DNS_LOG_FORMAT",
            "PROBE_INTERVAL_MS",
            "PROBE_TIMEOUT_MS",
            "MAX_RECORDS",
            "DNS_RESOLVER",
            "DNS_LOOKUP_COMMAND",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_with_all_vars() {
        setup_test_env();

        env::set_var(HOSTNAME_VAR, "example.com");
        env::set_var("LOG_LEVEL", "debug");
        env::set_var("DNS_LOG_FILE", "/tmp/probe.log");
        env::set_var("DNS_LOG_FORMAT", "json");
        env::set_var("PROBE_INTERVAL_MS", "250");
        env::set_var("PROBE_TIMEOUT_MS", "2000");
        env::set_var("MAX_RECORDS", "500");
        env::set_var("DNS_RESOLVER", "command");
        env::set_var("DNS_LOOKUP_COMMAND", "host {host}");

        let config = Config::from_env().expect("should load config");

        assert_eq!(config.hostname, "example.com");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_file, "/tmp/probe.log");
        assert_eq!(config.log_format, AuditFormat::Json);
        assert_eq!(config.probe_interval_ms, 250);
        assert_eq!(config.probe_timeout_ms, 2000);
        assert_eq!(config.max_records, 500);
        assert_eq!(config.resolver, ResolverStrategy::Command);
        assert_eq!(config.lookup_command, "host {host}");

        setup_test_env();
    }

    #[test]
    #[serial]
    fn test_config_from_env_defaults() {
        setup_test_env();

        env::set_var(HOSTNAME_VAR, "example.org");

        let config = Config::from_env().expect("should load config");

        assert_eq!(config.hostname, "example.org");
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.log_file, DEFAULT_LOG_FILE);
        assert_eq!(config.log_format, AuditFormat::Text);
        assert_eq!(config.probe_interval_ms, DEFAULT_PROBE_INTERVAL_MS);
        assert_eq!(config.probe_timeout_ms, DEFAULT_PROBE_TIMEOUT_MS);
        assert_eq!(config.max_records, DEFAULT_MAX_RECORDS);
        assert_eq!(config.resolver, ResolverStrategy::System);
        assert_eq!(config.lookup_command, DEFAULT_LOOKUP_COMMAND);

        setup_test_env();
    }

    #[test]
    #[serial]
    fn test_config_missing_hostname() {
        setup_test_env();

        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingRequired { var } if var == HOSTNAME_VAR
        ));
    }

    #[test]
    #[serial]
    fn test_config_empty_hostname() {
        setup_test_env();

        env::set_var(HOSTNAME_VAR, "   ");

        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { var, .. } if var == HOSTNAME_VAR
        ));

        setup_test_env();
    }

    #[test]
    #[serial]
    fn test_config_invalid_interval_format() {
        setup_test_env();

        env::set_var(HOSTNAME_VAR, "example.com");
        env::set_var("PROBE_INTERVAL_MS", "fast");

        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { var, .. } if var == "PROBE_INTERVAL_MS"
        ));

        setup_test_env();
    }

    #[test]
    #[serial]
    fn test_config_unknown_resolver() {
        setup_test_env();

        env::set_var(HOSTNAME_VAR, "example.com");
        env::set_var("DNS_RESOLVER", "carrier-pigeon");

        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref var, ref reason }
                if var == "DNS_RESOLVER" && reason.contains("carrier-pigeon")
        ));

        setup_test_env();
    }

    #[test]
    #[serial]
    fn test_config_max_records_validation_failure() {
        setup_test_env();

        env::set_var(HOSTNAME_VAR, "example.com");
        env::set_var("MAX_RECORDS", "0");

        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { var, .. } if var == "MAX_RECORDS"
        ));

        setup_test_env();
    }

    #[test]
    fn test_resolver_strategy_from_str() {
        assert_eq!(
            "System".parse::<ResolverStrategy>(),
            Ok(ResolverStrategy::System)
        );
        assert_eq!(
            " command ".parse::<ResolverStrategy>(),
            Ok(ResolverStrategy::Command)
        );
        assert!("dns".parse::<ResolverStrategy>().is_err());
    }

    #[test]
    fn test_resolver_strategy_display() {
        assert_eq!(ResolverStrategy::System.to_string(), "system");
        assert_eq!(ResolverStrategy::Command.to_string(), "command");
    }

    #[test]
    fn test_audit_format_from_str() {
        assert_eq!("TEXT".parse::<AuditFormat>(), Ok(AuditFormat::Text));
        assert_eq!("json".parse::<AuditFormat>(), Ok(AuditFormat::Json));
        assert!("xml".parse::<AuditFormat>().is_err());
    }

    #[test]
    fn test_durations() {
        let config = Config {
            hostname: "example.com".to_string(),
            log_level: "warn".to_string(),
            log_file: "dns.log".to_string(),
            log_format: AuditFormat::Text,
            probe_interval_ms: 75,
            probe_timeout_ms: 1500,
            max_records: 10,
            resolver: ResolverStrategy::System,
            lookup_command: DEFAULT_LOOKUP_COMMAND.to_string(),
        };

        assert_eq!(config.probe_interval(), Duration::from_millis(75));
        assert_eq!(config.probe_timeout(), Duration::from_millis(1500));
    }

    #[test]
    fn test_parse_env_u64_default() {
        env::remove_var("TEST_PROBE_U64_MISSING");
        let result = parse_env_u64("TEST_PROBE_U64_MISSING", 999);
        assert_eq!(result.unwrap(), 999);
    }

    #[test]
    fn test_parse_env_usize_invalid() {
        env::set_var("TEST_PROBE_USIZE_INVALID", "-3");
        let result = parse_env_usize("TEST_PROBE_USIZE_INVALID", 0);
        assert!(result.is_err());
        env::remove_var("TEST_PROBE_USIZE_INVALID");
    }
}
