//! Latency percentiles and proportional bars.
//!
//! Percentiles use linear interpolation between the two nearest ranks of
//! an ascending sample: `rank = p/100 * (n-1)`, then
//! `s[floor] * (1 - frac) + s[floor + 1] * frac`.
//!
//! # Example
//!
//! ```
//! use dns_probe::stats::{build_bar, percentile};
//!
//! let sorted = [10.0, 20.0, 30.0, 40.0];
//! assert_eq!(percentile(&sorted, 50.0), 25.0);
//! assert_eq!(percentile(&[], 99.0), 0.0);
//! assert_eq!(build_bar(20.0, 40.0).chars().count(), 21);
//! ```

// Durations become f64 milliseconds and bar widths come back from f64
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use crate::probe::ProbeOutcome;

/// Percentiles shown in the report, in display order.
pub const REPORT_PERCENTILES: [f64; 6] = [50.0, 75.0, 90.0, 95.0, 99.0, 99.9];

/// Width of a full-scale bar, excluding the leading glyph.
pub const MAX_BAR_WIDTH: usize = 40;

/// Glyph bars are drawn with.
pub const BAR_GLYPH: char = '█';

/// Linear-interpolation percentile of an ascending sample.
///
/// `p` is clamped to `[0, 100]`. Empty input yields `0.0`.
#[must_use]
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }

    let rank = p.clamp(0.0, 100.0) / 100.0 * (n - 1) as f64;
    let floor = (rank.floor() as usize).min(n - 1);
    let frac = rank - floor as f64;

    match sorted.get(floor + 1) {
        Some(&next) => (next - sorted[floor]).mul_add(frac, sorted[floor]),
        None => sorted[floor],
    }
}

/// Bar proportional to `value / max`.
///
/// A leading glyph plus `round(value / max * 40)` more. Returns an empty
/// string when `max` is zero.
#[must_use]
pub fn build_bar(value: f64, max: f64) -> String {
    if max <= 0.0 || !max.is_finite() {
        return String::new();
    }

    let ratio = (value / max).clamp(0.0, 1.0);
    let len = (ratio * MAX_BAR_WIDTH as f64).round() as usize;
    std::iter::repeat(BAR_GLYPH).take(len + 1).collect()
}

/// One row of the percentile report.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentileRow {
    /// Percentile, e.g. `99.9`.
    pub percentile: f64,
    /// Interpolated duration in milliseconds.
    pub value_ms: f64,
    /// Bar scaled against the slowest sample.
    pub bar: String,
}

impl PercentileRow {
    /// Display label such as `P50` or `P99.9`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("P{}", self.percentile)
    }

    /// Value rounded to whole milliseconds.
    #[must_use]
    pub fn rounded_ms(&self) -> u64 {
        self.value_ms.round().max(0.0) as u64
    }
}

/// Percentile summary of the current history.
#[derive(Debug, Clone, PartialEq)]
pub enum PercentileReport {
    /// No outcomes recorded yet.
    NoData,
    /// One row per entry of [`REPORT_PERCENTILES`].
    Ready(Vec<PercentileRow>),
}

impl PercentileReport {
    /// Report rows, empty when there is no data.
    #[must_use]
    pub fn rows(&self) -> &[PercentileRow] {
        match self {
            Self::NoData => &[],
            Self::Ready(rows) => rows,
        }
    }
}

/// Compute the report over all given outcomes.
///
/// Durations are taken in whole milliseconds.
pub fn compute_percentile_report<'a, I>(records: I) -> PercentileReport
where
    I: IntoIterator<Item = &'a ProbeOutcome>,
{
    let mut durations: Vec<f64> = records
        .into_iter()
        .map(|r| r.duration().as_millis() as f64)
        .collect();
    if durations.is_empty() {
        return PercentileReport::NoData;
    }

    durations.sort_by(f64::total_cmp);
    let max = durations.last().copied().unwrap_or_default();

    let rows = REPORT_PERCENTILES
        .iter()
        .map(|&p| {
            let value_ms = percentile(&durations, p);
            PercentileRow {
                percentile: p,
                value_ms,
                bar: build_bar(value_ms, max),
            }
        })
        .collect();

    PercentileReport::Ready(rows)
}
