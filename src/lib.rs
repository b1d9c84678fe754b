//! DNS Probe
//!
//! A continuous DNS resolution monitor. It resolves one hostname in a
//! tight loop, logs every attempt to an audit file and redraws a live
//! terminal dashboard with latency statistics.
//!
//! # Features
//!
//! - Success / slow / failure classification with a 5 second slow threshold
//! - Bounded history of the last 10,000 attempts within a 5 minute window
//! - Percentiles (P50 to P99.9) rendered as proportional text bars
//! - System resolver or an external lookup command such as `dig +short`
//! - Text or JSON audit log, flushed on every line
//!
//! # Quick Start
//!
//! ```bash
//! DNS_HOSTNAME=example.com ./dns-probe
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌────────┐  probe   ┌──────────┐  outcome  ┌───────────┐
//! │ Runner │─────────▶│  Prober  │──────────▶│ AuditLog  │──▶ dns_results.log
//! └───┬────┘          │(Resolver)│           └───────────┘
//!     │               └──────────┘
//!     │ record(outcome, now)
//!     ▼
//! ┌─────────┐ view ┌───────────┐ render ┌───────────┐
//! │ Monitor │─────▶│ Dashboard │───────▶│  stdout   │
//! │ history │      └───────────┘        └───────────┘
//! │ stats   │
//! └─────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod audit;
pub mod config;
pub mod error;
pub mod history;
pub mod monitor;
pub mod probe;
pub mod render;
pub mod resolver;
pub mod runner;
pub mod stats;
pub mod traits;

#[cfg(test)]
mod test_utils;
