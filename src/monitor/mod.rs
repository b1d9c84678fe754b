//! Probe aggregation.
//!
//! The [`Monitor`] owns everything the dashboard needs: the windowed
//! [`HistoryStore`], lifetime [`ProbeCounters`], the [`DurationRing`] of
//! recent durations and the last outcome. The driver records one outcome
//! per cycle and asks for a [`DashboardView`] using the same `now`, so
//! eviction and the top-slowest filter agree on the window.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use chrono::Utc;
//! use dns_probe::monitor::Monitor;
//! use dns_probe::probe::ProbeOutcome;
//!
//! let now = Utc::now();
//! let mut monitor = Monitor::new(10_000, now);
//! monitor.record(
//!     ProbeOutcome::from_lookup("example.com", now, Duration::from_millis(12), Ok(vec!["192.0.2.1".into()])),
//!     now,
//! );
//!
//! let view = monitor.view(now);
//! assert_eq!(view.counters.success, 1);
//! assert_eq!(view.top_slowest.len(), 1);
//! ```

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::history::HistoryStore;
use crate::probe::ProbeOutcome;
use crate::stats::{
    compute_percentile_report, top_slowest, DurationRing, PercentileReport, ProbeCounters,
    TOP_SLOWEST,
};

/// Everything the renderer shows for one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Time since the monitor started, truncated to whole seconds.
    pub uptime: Duration,
    /// Lifetime totals.
    pub counters: ProbeCounters,
    /// Most recent outcome, if any.
    pub last: Option<ProbeOutcome>,
    /// Recent durations, oldest first.
    pub recent: Vec<Duration>,
    /// Slowest outcomes inside the window, slowest first.
    pub top_slowest: Vec<ProbeOutcome>,
    /// Percentiles over the retained history.
    pub percentiles: PercentileReport,
    /// Records currently retained.
    pub history_len: usize,
    /// History size cap.
    pub max_records: usize,
    /// History retention window.
    pub window: Duration,
}

/// Aggregates probe outcomes across cycles.
#[derive(Debug, Clone)]
pub struct Monitor {
    history: HistoryStore,
    counters: ProbeCounters,
    recent: DurationRing,
    last: Option<ProbeOutcome>,
    started_at: DateTime<Utc>,
}

impl Monitor {
    /// Create a monitor with the default window and a history cap.
    #[must_use]
    pub fn new(max_records: usize, started_at: DateTime<Utc>) -> Self {
        Self::with_history(HistoryStore::new(max_records), started_at)
    }

    /// Create a monitor around an existing history store.
    #[must_use]
    pub fn with_history(history: HistoryStore, started_at: DateTime<Utc>) -> Self {
        Self {
            history,
            counters: ProbeCounters::default(),
            recent: DurationRing::default(),
            last: None,
            started_at,
        }
    }

    /// Record one outcome and apply the retention policy as of `now`.
    pub fn record(&mut self, outcome: ProbeOutcome, now: DateTime<Utc>) {
        self.counters.observe(outcome.kind());
        self.recent.push(outcome.duration());
        self.history.append(outcome.clone());
        self.history.evict_expired_and_excess(now);
        self.last = Some(outcome);
    }

    /// Build the dashboard view as of `now`.
    #[must_use]
    pub fn view(&self, now: DateTime<Utc>) -> DashboardView {
        let uptime = (now - self.started_at)
            .to_std()
            .map(|d| Duration::from_secs(d.as_secs()))
            .unwrap_or_default();

        DashboardView {
            uptime,
            counters: self.counters,
            last: self.last.clone(),
            recent: self.recent.iter().collect(),
            top_slowest: top_slowest(
                self.history.snapshot(),
                now,
                self.history.window(),
                TOP_SLOWEST,
            ),
            percentiles: compute_percentile_report(self.history.snapshot()),
            history_len: self.history.len(),
            max_records: self.history.max_records(),
            window: self.history.window(),
        }
    }

    /// Lifetime totals.
    #[must_use]
    pub const fn counters(&self) -> ProbeCounters {
        self.counters
    }

    /// Retained history.
    #[must_use]
    pub const fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Most recent outcome.
    #[must_use]
    pub const fn last(&self) -> Option<&ProbeOutcome> {
        self.last.as_ref()
    }
}
