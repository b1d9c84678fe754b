//! Probe outcomes and the prober that produces them.
//!
//! A [`ProbeOutcome`] is the classified result of one resolution attempt.
//! The [`Prober`] wraps any [`Resolver`], times the lookup, enforces the
//! timeout and classifies the result:
//!
//! - [`ProbeKind::Failure`] when the lookup errored or timed out
//! - [`ProbeKind::Slow`] when it succeeded but took longer than [`SLOW_THRESHOLD`]
//! - [`ProbeKind::Success`] otherwise
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use dns_probe::probe::{classify, ProbeKind};
//!
//! assert_eq!(classify(Duration::from_millis(12), false), ProbeKind::Success);
//! assert_eq!(classify(Duration::from_secs(6), false), ProbeKind::Slow);
//! assert_eq!(classify(Duration::from_secs(6), true), ProbeKind::Failure);
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ResolveError;
use crate::traits::{Resolver, TimeProvider};

/// Responses slower than this are classified as [`ProbeKind::Slow`].
pub const SLOW_THRESHOLD: Duration = Duration::from_secs(5);

/// Classification of a single attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeKind {
    /// Resolved within the slow threshold.
    Success,
    /// Resolved, but slower than the slow threshold.
    Slow,
    /// Resolution errored or timed out.
    Failure,
}

impl ProbeKind {
    /// Short tag used in the audit log.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::Slow => "SLOW",
            Self::Failure => "FAIL",
        }
    }
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Classify an attempt from its duration and whether it errored.
#[must_use]
pub fn classify(duration: Duration, errored: bool) -> ProbeKind {
    if errored {
        ProbeKind::Failure
    } else if duration > SLOW_THRESHOLD {
        ProbeKind::Slow
    } else {
        ProbeKind::Success
    }
}

/// The result of one resolution attempt.
///
/// Fields are private so the outcome stays consistent: a failure always
/// carries an error and no addresses, anything else carries addresses and
/// no error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    timestamp: DateTime<Utc>,
    duration: Duration,
    kind: ProbeKind,
    addresses: Vec<String>,
    error: Option<ResolveError>,
}

impl ProbeOutcome {
    /// Build an outcome from a lookup result.
    ///
    /// An empty address list without an error is not a valid answer and
    /// is recorded as [`ResolveError::NoAddresses`].
    #[must_use]
    pub fn from_lookup(
        hostname: &str,
        timestamp: DateTime<Utc>,
        duration: Duration,
        result: Result<Vec<String>, ResolveError>,
    ) -> Self {
        match result {
            Ok(addresses) if addresses.is_empty() => Self::failure(
                timestamp,
                duration,
                ResolveError::NoAddresses {
                    hostname: hostname.to_string(),
                },
            ),
            Ok(addresses) => Self::resolved(timestamp, duration, addresses),
            Err(error) => Self::failure(timestamp, duration, error),
        }
    }

    /// Build a failed outcome.
    #[must_use]
    pub const fn failure(timestamp: DateTime<Utc>, duration: Duration, error: ResolveError) -> Self {
        Self {
            timestamp,
            duration,
            kind: ProbeKind::Failure,
            addresses: Vec::new(),
            error: Some(error),
        }
    }

    fn resolved(timestamp: DateTime<Utc>, duration: Duration, addresses: Vec<String>) -> Self {
        Self {
            timestamp,
            duration,
            kind: classify(duration, false),
            addresses,
            error: None,
        }
    }

    /// When the attempt was recorded.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// How long the attempt took.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Classification.
    #[must_use]
    pub const fn kind(&self) -> ProbeKind {
        self.kind
    }

    /// Resolved addresses, empty for failures.
    #[must_use]
    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }

    /// The error of a failed attempt.
    #[must_use]
    pub const fn error(&self) -> Option<&ResolveError> {
        self.error.as_ref()
    }
}

/// Runs one timed lookup against a [`Resolver`].
pub struct Prober {
    resolver: Arc<dyn Resolver>,
    clock: Arc<dyn TimeProvider>,
    timeout: Duration,
}

impl fmt::Debug for Prober {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prober")
            .field("resolver", &self.resolver.name())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Prober {
    /// Create a prober.
    #[must_use]
    pub fn new(
        resolver: Arc<dyn Resolver>,
        clock: Arc<dyn TimeProvider>,
        timeout: Duration,
    ) -> Self {
        Self {
            resolver,
            clock,
            timeout,
        }
    }

    /// Name of the underlying resolution strategy.
    #[must_use]
    pub fn resolver_name(&self) -> &'static str {
        self.resolver.name()
    }

    /// Resolve `hostname` once and classify the result.
    ///
    /// Never fails: errors and timeouts become [`ProbeKind::Failure`]
    /// outcomes that still carry the elapsed duration.
    pub async fn probe(&self, hostname: &str) -> ProbeOutcome {
        let start = tokio::time::Instant::now();
        let result =
            match tokio::time::timeout(self.timeout, self.resolver.resolve(hostname)).await {
                Ok(result) => result,
                Err(_) => Err(ResolveError::Timeout {
                    timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
                }),
            };
        let duration = start.elapsed();

        let outcome = ProbeOutcome::from_lookup(hostname, self.clock.now(), duration, result);
        tracing::debug!(
            hostname,
            kind = %outcome.kind(),
            duration_ms = outcome.duration().as_millis(),
            "probe finished"
        );
        outcome
    }
}
