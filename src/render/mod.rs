//! Terminal dashboard.
//!
//! Turns a [`DashboardView`] into the text screen redrawn every cycle.
//! Rendering is a pure function; clearing the terminal and writing the
//! screen out is the driver's job (see [`CLEAR_SCREEN`]).

use std::fmt;
use std::time::Duration;

use crate::audit::TIMESTAMP_FORMAT;
use crate::monitor::DashboardView;
use crate::probe::{ProbeKind, ProbeOutcome};
use crate::stats::{PercentileReport, RECENT_DURATIONS, TOP_SLOWEST};

/// ANSI sequence that clears the screen and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[1;1H";

/// Static context shown in the dashboard header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    hostname: String,
    resolver: String,
}

impl Dashboard {
    /// Create a dashboard for `hostname` resolved with `resolver`.
    #[must_use]
    pub fn new(hostname: impl Into<String>, resolver: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            resolver: resolver.into(),
        }
    }

    /// Render the whole screen.
    #[must_use]
    pub fn render(&self, view: &DashboardView) -> String {
        Screen {
            dashboard: self,
            view,
        }
        .to_string()
    }
}

/// One frame of the dashboard.
struct Screen<'a> {
    dashboard: &'a Dashboard,
    view: &'a DashboardView,
}

impl fmt::Display for Screen<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.view;
        writeln!(out, "📡 DNS Monitor")?;
        writeln!(out, "🌐 Resolving Hostname: {}", self.dashboard.hostname)?;
        writeln!(out, "🔧 Resolver          : {}", self.dashboard.resolver)?;
        writeln!(out, "⏱️  Uptime: {}", format_uptime(view.uptime))?;
        writeln!(out)?;

        writeln!(out, "✅ Successes     : {}", view.counters.success)?;
        writeln!(out, "🐢 Slow Responses: {}", view.counters.slow)?;
        writeln!(out, "❌ Failures      : {}", view.counters.failure)?;

        writeln!(out, "\n📊 Last Attempt:")?;
        match &view.last {
            Some(last) => write_last(out, last)?,
            None => writeln!(out, "   (waiting for first probe)")?,
        }

        writeln!(out, "\n🧮 Last {RECENT_DURATIONS} Durations:")?;
        for (i, d) in view.recent.iter().enumerate() {
            writeln!(out, "   {}. {d:?}", i + 1)?;
        }

        writeln!(
            out,
            "\n⏱️  Top {TOP_SLOWEST} Slowest in Last {}:",
            window_label(view.window)
        )?;
        for (i, r) in view.top_slowest.iter().enumerate() {
            writeln!(
                out,
                "   {}. {} - {:?}",
                i + 1,
                r.timestamp().format("%H:%M:%S%.3f"),
                r.duration()
            )?;
        }

        writeln!(
            out,
            "\n📈 Duration Percentiles (Last {} Records, {} retained):",
            view.max_records, view.history_len
        )?;
        write_percentiles(out, &view.percentiles)?;

        writeln!(out, "\n(Press Ctrl+C to stop)")
    }
}

fn write_last(out: &mut fmt::Formatter<'_>, last: &ProbeOutcome) -> fmt::Result {
    let result = match (last.kind(), last.error()) {
        (ProbeKind::Failure, Some(err)) => format!("❌ FAIL ({err})"),
        (ProbeKind::Failure, None) => "❌ FAIL".to_string(),
        (ProbeKind::Slow, _) => "🐢 SLOW".to_string(),
        (ProbeKind::Success, _) => "✅ SUCCESS".to_string(),
    };
    writeln!(out, "   Result       : {result}")?;
    writeln!(out, "   Duration     : {:?}", last.duration())?;
    writeln!(out, "   At           : {}", last.timestamp().format(TIMESTAMP_FORMAT))?;
    if !last.addresses().is_empty() {
        writeln!(out, "   Resolved IPs : [{}]", last.addresses().join(" "))?;
    }
    Ok(())
}

fn write_percentiles(out: &mut fmt::Formatter<'_>, report: &PercentileReport) -> fmt::Result {
    match report {
        PercentileReport::NoData => writeln!(out, "   (no data yet)"),
        PercentileReport::Ready(rows) => {
            for row in rows {
                writeln!(
                    out,
                    "{:<5} │ {} {}ms",
                    row.label(),
                    row.bar,
                    row.rounded_ms()
                )?;
            }
            Ok(())
        }
    }
}

/// Format an uptime such as `42s`, `3m 5s` or `2h 10m`.
#[must_use]
pub fn format_uptime(d: Duration) -> String {
    let secs = d.as_secs();

    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        let (mins, rem) = (secs / 60, secs % 60);
        if rem == 0 {
            format!("{mins}m")
        } else {
            format!("{mins}m {rem}s")
        }
    } else {
        let (hours, mins) = (secs / 3600, (secs % 3600) / 60);
        if mins == 0 {
            format!("{hours}h")
        } else {
            format!("{hours}h {mins}m")
        }
    }
}

fn window_label(window: Duration) -> String {
    let secs = window.as_secs();
    if secs >= 60 && secs % 60 == 0 {
        format!("{} Minutes", secs / 60)
    } else {
        format!("{secs} Seconds")
    }
}
