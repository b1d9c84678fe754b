//! Trait definitions for mockable dependencies.
//!
//! This module defines traits for:
//! - [`Resolver`]: hostname resolution strategy
//! - [`TimeProvider`]: Time abstraction for testing
//!
//! # Mocking
//!
//! All traits are annotated with `#[cfg_attr(test, mockall::automock)]`
//! which generates mock implementations automatically for testing.
//!
//! # Example
//!
//! ```
//! use dns_probe::traits::{TimeProvider, RealTimeProvider};
//!
//! let time_provider = RealTimeProvider;
//! let now = time_provider.now();
//! println!("Current time: {now}");
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::ResolveError;

/// Hostname resolution capability.
///
/// Implementations only report what they found; timing, timeouts and
/// classification are handled by [`crate::probe::Prober`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Resolve `hostname` into address strings, in resolver order.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the lookup fails.
    async fn resolve(&self, hostname: &str) -> Result<Vec<String>, ResolveError>;

    /// Short name of the strategy, shown on the dashboard.
    fn name(&self) -> &'static str;
}

/// Time provider trait for mocking.
///
/// This trait abstracts time operations to allow for
/// deterministic testing of windowing logic.
#[cfg_attr(test, mockall::automock)]
pub trait TimeProvider: Send + Sync {
    /// Get the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Real time provider using system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealTimeProvider;

impl TimeProvider for RealTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
