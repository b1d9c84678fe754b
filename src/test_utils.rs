//! Test utilities and mock factories.
//!
//! Only compiled for tests (`#[cfg(test)]`).

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::ResolveError;
use crate::probe::ProbeOutcome;
use crate::traits::{MockResolver, MockTimeProvider, TimeProvider};

/// Create a mock resolver that always answers with `addresses`.
///
/// # Example
///
/// ```ignore
/// let mock = mock_resolver_success(&["192.0.2.1"]);
/// assert_eq!(mock.resolve("example.com").await.unwrap(), ["192.0.2.1"]);
/// ```
#[must_use]
pub fn mock_resolver_success(addresses: &[&str]) -> MockResolver {
    let addresses: Vec<String> = addresses.iter().map(ToString::to_string).collect();
    let mut mock = MockResolver::new();
    mock.expect_resolve()
        .returning(move |_| Ok(addresses.clone()));
    mock.expect_name().return_const("mock");
    mock
}

/// Create a mock resolver that always fails with a lookup error.
#[must_use]
pub fn mock_resolver_error(message: impl Into<String>) -> MockResolver {
    let message = message.into();
    let mut mock = MockResolver::new();
    mock.expect_resolve().returning(move |host| {
        Err(ResolveError::Lookup {
            hostname: host.to_string(),
            message: message.clone(),
        })
    });
    mock.expect_name().return_const("mock");
    mock
}

/// Create a clock frozen at `now`.
#[must_use]
pub fn fixed_clock(now: DateTime<Utc>) -> Arc<dyn TimeProvider> {
    let mut mock = MockTimeProvider::new();
    mock.expect_now().return_const(now);
    Arc::new(mock)
}

/// A successful outcome at `timestamp` that took `millis`.
#[must_use]
pub fn outcome_at(timestamp: DateTime<Utc>, millis: u64) -> ProbeOutcome {
    ProbeOutcome::from_lookup(
        "example.com",
        timestamp,
        Duration::from_millis(millis),
        Ok(vec!["192.0.2.1".to_string()]),
    )
}

/// A failed outcome at `timestamp` that took `millis`.
#[must_use]
pub fn failure_at(timestamp: DateTime<Utc>, millis: u64) -> ProbeOutcome {
    ProbeOutcome::failure(
        timestamp,
        Duration::from_millis(millis),
        ResolveError::Lookup {
            hostname: "example.com".to_string(),
            message: "SERVFAIL".to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ProbeKind;
    use crate::traits::Resolver;

    #[tokio::test]
    async fn test_mock_resolver_success() {
        let mock = mock_resolver_success(&["192.0.2.1", "192.0.2.2"]);
        let addrs = mock.resolve("example.com").await.unwrap();
        assert_eq!(addrs, ["192.0.2.1", "192.0.2.2"]);
        assert_eq!(mock.name(), "mock");
    }

    #[tokio::test]
    async fn test_mock_resolver_error() {
        let mock = mock_resolver_error("refused");
        let err = mock.resolve("example.com").await.unwrap_err();
        assert_eq!(err.to_string(), "lookup example.com: refused");
    }

    #[test]
    fn test_outcome_builders() {
        let now = Utc::now();
        assert_eq!(outcome_at(now, 10).kind(), ProbeKind::Success);
        assert_eq!(failure_at(now, 10).kind(), ProbeKind::Failure);
        assert_eq!(fixed_clock(now).now(), now);
    }
}
