//! Statistics over probe outcomes.
//!
//! This module provides:
//! - [`ProbeCounters`]: lifetime totals per [`ProbeKind`]
//! - [`DurationRing`]: the most recent durations, fixed capacity
//! - [`top_slowest`]: the slowest outcomes inside the retention window
//! - Percentile statistics (see [`percentile`] and [`compute_percentile_report`])
//!
//! Everything here is pure: the counters and ring are owned by
//! [`crate::monitor::Monitor`], the history by [`crate::history::HistoryStore`].

mod percentile;

pub use percentile::{
    build_bar, compute_percentile_report, percentile, PercentileReport, PercentileRow,
    BAR_GLYPH, MAX_BAR_WIDTH, REPORT_PERCENTILES,
};

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::history::window_cutoff;
use crate::probe::{ProbeKind, ProbeOutcome};

/// Number of slowest outcomes shown on the dashboard.
pub const TOP_SLOWEST: usize = 5;

/// Capacity of the recent-duration ring.
pub const RECENT_DURATIONS: usize = 5;

/// Lifetime totals per outcome kind.
///
/// Counters only grow and ignore the history window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeCounters {
    /// Attempts resolved within the slow threshold.
    pub success: u64,
    /// Attempts resolved above the slow threshold.
    pub slow: u64,
    /// Attempts that errored or timed out.
    pub failure: u64,
}

impl ProbeCounters {
    /// Count one attempt.
    pub fn observe(&mut self, kind: ProbeKind) {
        let slot = match kind {
            ProbeKind::Success => &mut self.success,
            ProbeKind::Slow => &mut self.slow,
            ProbeKind::Failure => &mut self.failure,
        };
        *slot = slot.saturating_add(1);
    }

    /// Total attempts counted.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.success
            .saturating_add(self.slow)
            .saturating_add(self.failure)
    }
}

/// Bounded FIFO of recent durations, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationRing {
    items: VecDeque<Duration>,
    capacity: usize,
}

impl Default for DurationRing {
    fn default() -> Self {
        Self::new(RECENT_DURATIONS)
    }
}

impl DurationRing {
    /// Create an empty ring holding at most `capacity` durations.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a duration, evicting the oldest when full.
    pub fn push(&mut self, duration: Duration) {
        if self.capacity == 0 {
            return;
        }
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(duration);
    }

    /// Durations, oldest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Duration> + '_ {
        self.items.iter().copied()
    }

    /// Number of stored durations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the ring is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maximum number of durations kept.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

/// The `k` slowest outcomes recorded within `window` of `now`.
///
/// Sorted by duration, slowest first. The sort is stable, so equal
/// durations stay in chronological order.
pub fn top_slowest<'a, I>(
    records: I,
    now: DateTime<Utc>,
    window: Duration,
    k: usize,
) -> Vec<ProbeOutcome>
where
    I: IntoIterator<Item = &'a ProbeOutcome>,
{
    let cutoff = window_cutoff(now, window);
    let mut recent: Vec<&ProbeOutcome> = records
        .into_iter()
        .filter(|r| cutoff.is_none_or(|c| r.timestamp() >= c))
        .collect();

    recent.sort_by(|a, b| b.duration().cmp(&a.duration()));
    recent.into_iter().take(k).cloned().collect()
}
