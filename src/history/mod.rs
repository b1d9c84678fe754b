//! Rolling history of probe outcomes.
//!
//! The [`HistoryStore`] keeps outcomes in insertion order and enforces two
//! bounds every time [`HistoryStore::evict_expired_and_excess`] runs:
//!
//! 1. at most `max_records` entries, oldest dropped first
//! 2. no entry older than the retention window relative to `now`
//!
//! History lives in memory only and starts empty on every run.

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::probe::ProbeOutcome;

/// Trailing retention window for history.
pub const HISTORY_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Earliest timestamp still inside `window` of `now`.
///
/// Returns `None` when the window reaches past the representable range,
/// in which case nothing is old enough to expire.
#[must_use]
pub fn window_cutoff(now: DateTime<Utc>, window: Duration) -> Option<DateTime<Utc>> {
    let span = TimeDelta::from_std(window).ok()?;
    now.checked_sub_signed(span)
}

/// Time- and size-bounded outcome buffer, oldest first.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    records: VecDeque<ProbeOutcome>,
    max_records: usize,
    window: Duration,
}

impl HistoryStore {
    /// Create an empty store with the default [`HISTORY_WINDOW`].
    #[must_use]
    pub fn new(max_records: usize) -> Self {
        Self::with_window(max_records, HISTORY_WINDOW)
    }

    /// Create an empty store with a custom retention window.
    #[must_use]
    pub fn with_window(max_records: usize, window: Duration) -> Self {
        Self {
            records: VecDeque::new(),
            max_records,
            window,
        }
    }

    /// Add an outcome at the tail.
    pub fn append(&mut self, outcome: ProbeOutcome) {
        self.records.push_back(outcome);
    }

    /// Apply the size cap, then drop everything older than the window.
    pub fn evict_expired_and_excess(&mut self, now: DateTime<Utc>) {
        if self.records.len() > self.max_records {
            let excess = self.records.len() - self.max_records;
            self.records.drain(..excess);
        }

        if let Some(cutoff) = window_cutoff(now, self.window) {
            // Timestamps may arrive out of order, so scan everything.
            self.records.retain(|r| r.timestamp() >= cutoff);
        }
    }

    /// Read-only view of the current records, oldest first.
    pub fn snapshot(&self) -> impl ExactSizeIterator<Item = &ProbeOutcome> + Clone + '_ {
        self.records.iter()
    }

    /// Number of retained records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Size cap.
    #[must_use]
    pub const fn max_records(&self) -> usize {
        self.max_records
    }

    /// Retention window.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::ResolveError;
    use crate::test_utils::outcome_at;
    use pretty_assertions::assert_eq;

    fn durations(store: &HistoryStore) -> Vec<u64> {
        store
            .snapshot()
            .map(|r| u64::try_from(r.duration().as_millis()).unwrap())
            .collect()
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = HistoryStore::new(10);
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.max_records(), 10);
        assert_eq!(store.window(), HISTORY_WINDOW);
    }

    #[test]
    fn test_append_preserves_order() {
        let now = Utc::now();
        let mut store = HistoryStore::new(10);
        store.append(outcome_at(now, 1));
        store.append(outcome_at(now, 2));
        store.append(outcome_at(now, 3));
        store.evict_expired_and_excess(now);

        assert_eq!(durations(&store), vec![1, 2, 3]);
    }

    #[test]
    fn test_size_cap_drops_oldest() {
        let now = Utc::now();
        let mut store = HistoryStore::new(3);
        for ms in 1..=5 {
            store.append(outcome_at(now, ms));
            store.evict_expired_and_excess(now);
        }

        assert_eq!(store.len(), 3);
        assert_eq!(durations(&store), vec![3, 4, 5]);
    }

    #[test]
    fn test_size_cap_after_bulk_append() {
        let now = Utc::now();
        let mut store = HistoryStore::new(2);
        for ms in 1..=6 {
            store.append(outcome_at(now, ms));
        }
        store.evict_expired_and_excess(now);

        assert_eq!(durations(&store), vec![5, 6]);
    }

    #[test]
    fn test_expired_records_dropped() {
        let now = Utc::now();
        let mut store = HistoryStore::new(100);
        store.append(outcome_at(now - TimeDelta::minutes(10), 1));
        store.append(outcome_at(now - TimeDelta::minutes(6), 2));
        store.append(outcome_at(now - TimeDelta::minutes(4), 3));
        store.append(outcome_at(now, 4));
        store.evict_expired_and_excess(now);

        assert_eq!(durations(&store), vec![3, 4]);
    }

    #[test]
    fn test_record_exactly_at_window_edge_is_kept() {
        let now = Utc::now();
        let mut store = HistoryStore::new(100);
        store.append(outcome_at(now - TimeDelta::minutes(5), 1));
        store.append(outcome_at(
            now - TimeDelta::minutes(5) - TimeDelta::milliseconds(1),
            2,
        ));
        store.evict_expired_and_excess(now);

        assert_eq!(durations(&store), vec![1]);
    }

    #[test]
    fn test_out_of_order_timestamps() {
        let now = Utc::now();
        let mut store = HistoryStore::new(100);
        store.append(outcome_at(now, 1));
        store.append(outcome_at(now - TimeDelta::hours(1), 2));
        store.append(outcome_at(now, 3));
        store.evict_expired_and_excess(now);

        assert_eq!(durations(&store), vec![1, 3]);
    }

    #[test]
    fn test_custom_window() {
        let now = Utc::now();
        let mut store = HistoryStore::with_window(100, Duration::from_secs(10));
        store.append(outcome_at(now - TimeDelta::seconds(11), 1));
        store.append(outcome_at(now - TimeDelta::seconds(9), 2));
        store.evict_expired_and_excess(now);

        assert_eq!(durations(&store), vec![2]);
    }

    #[test]
    fn test_failures_are_retained_like_successes() {
        let now = Utc::now();
        let mut store = HistoryStore::new(10);
        store.append(ProbeOutcome::failure(
            now,
            Duration::from_millis(42),
            ResolveError::Timeout { timeout_ms: 42 },
        ));
        store.evict_expired_and_excess(now);

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_window_cutoff() {
        let now = Utc::now();
        assert_eq!(
            window_cutoff(now, Duration::from_secs(60)),
            Some(now - TimeDelta::seconds(60))
        );
        assert_eq!(window_cutoff(now, Duration::MAX), None);
    }
}
