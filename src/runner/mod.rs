//! The probe loop.
//!
//! Each cycle runs strictly in sequence: probe, audit line, monitor
//! update, render, sleep. Only one probe is ever in flight, so the
//! [`Monitor`] is owned by the loop and needs no locking.
//!
//! The outcome's timestamp is the single `now` of its cycle: it drives
//! history eviction, the top-slowest window and uptime alike.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use crate::audit::AuditLog;
use crate::error::AppError;
use crate::monitor::Monitor;
use crate::probe::{ProbeOutcome, Prober};
use crate::render::{Dashboard, CLEAR_SCREEN};

/// Drives probes for one hostname until shut down.
#[derive(Debug)]
pub struct Runner<W> {
    hostname: String,
    prober: Prober,
    monitor: Monitor,
    audit: AuditLog,
    dashboard: Dashboard,
    out: W,
    interval: Duration,
}

impl<W: Write> Runner<W> {
    /// Assemble a runner.
    #[must_use]
    pub fn new(
        hostname: impl Into<String>,
        prober: Prober,
        monitor: Monitor,
        audit: AuditLog,
        out: W,
        interval: Duration,
    ) -> Self {
        let hostname = hostname.into();
        let dashboard = Dashboard::new(hostname.clone(), prober.resolver_name());
        Self {
            hostname,
            prober,
            monitor,
            audit,
            dashboard,
            out,
            interval,
        }
    }

    /// Aggregated state so far.
    #[must_use]
    pub const fn monitor(&self) -> &Monitor {
        &self.monitor
    }

    /// Run a single probe cycle and redraw the dashboard.
    ///
    /// Resolution failures are recorded, not returned. Audit write
    /// failures are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Output`] if the dashboard cannot be written.
    pub async fn run_cycle(&mut self) -> Result<ProbeOutcome, AppError> {
        let outcome = self.prober.probe(&self.hostname).await;
        self.complete_cycle(outcome.clone()).await?;
        Ok(outcome)
    }

    /// Audit, record and render an outcome that has already been probed.
    ///
    /// Must run to completion once started: the audit line and the
    /// monitor counters stay in step only if both happen.
    async fn complete_cycle(&mut self, outcome: ProbeOutcome) -> Result<(), AppError> {
        if let Err(e) = self.audit.record(&outcome).await {
            tracing::warn!(
                path = %self.audit.path().display(),
                error = %e,
                "Failed to write audit line"
            );
        }

        let now = outcome.timestamp();
        self.monitor.record(outcome, now);

        let screen = self.dashboard.render(&self.monitor.view(now));
        write!(self.out, "{CLEAR_SCREEN}{screen}")?;
        self.out.flush()?;
        Ok(())
    }

    /// Probe repeatedly until `shutdown` resolves.
    ///
    /// Shutdown interrupts a pending lookup or the pause between cycles,
    /// never the bookkeeping of a finished probe. Returns the monitor so
    /// callers can report final totals.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Output`] if the dashboard cannot be written.
    pub async fn run<F>(mut self, shutdown: F) -> Result<Monitor, AppError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        tracing::info!(
            hostname = %self.hostname,
            resolver = self.prober.resolver_name(),
            interval_ms = self.interval.as_millis(),
            "Probe loop started"
        );

        loop {
            tokio::select! {
                biased;
                () = &mut shutdown => break,
                outcome = self.prober.probe(&self.hostname) => {
                    self.complete_cycle(outcome).await?;
                }
            }

            tokio::select! {
                biased;
                () = &mut shutdown => break,
                () = tokio::time::sleep(self.interval) => {}
            }
        }

        if let Err(e) = self.audit.flush().await {
            tracing::warn!(error = %e, "Failed to flush audit log on shutdown");
        }
        let counters = self.monitor.counters();
        tracing::info!(
            success = counters.success,
            slow = counters.slow,
            failure = counters.failure,
            "Probe loop stopped"
        );
        Ok(self.monitor)
    }
}
