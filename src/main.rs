//! DNS Probe binary entry point.
//!
//! Logs go to stderr; stdout is reserved for the dashboard.
//!
//! Coverage is excluded because the main function needs a terminal and a
//! live resolver.

// Enable the coverage attribute when running with nightly for llvm-cov exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::sync::Arc;

use dns_probe::audit::AuditLog;
use dns_probe::config::{Config, HOSTNAME_VAR};
use dns_probe::error::ConfigError;
use dns_probe::monitor::Monitor;
use dns_probe::probe::Prober;
use dns_probe::resolver::build_resolver;
use dns_probe::runner::Runner;
use dns_probe::traits::{RealTimeProvider, TimeProvider};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(ConfigError::MissingRequired { var }) if var == HOSTNAME_VAR => {
            eprintln!("❌ Environment variable {HOSTNAME_VAR} is not set.");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("❌ Configuration error: {e}");
            std::process::exit(1);
        }
    };

    // Initialize logging to stderr only (stdout is for the dashboard)
    tracing_subscriber::fmt()
        .with_env_filter(
            config
                .log_level
                .parse()
                .unwrap_or_else(|_| tracing_subscriber::filter::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!(
        "Configuration loaded: hostname={}, resolver={}, log_file={}, timeout={}ms",
        config.hostname,
        config.resolver,
        config.log_file,
        config.probe_timeout_ms
    );

    let audit = match AuditLog::open(&config.log_file, config.log_format).await {
        Ok(audit) => audit,
        Err(e) => {
            tracing::error!("Audit log error: {e}");
            eprintln!("❌ Failed to open log file: {e}");
            std::process::exit(1);
        }
    };

    let clock: Arc<dyn TimeProvider> = Arc::new(RealTimeProvider);
    let prober = Prober::new(build_resolver(&config), Arc::clone(&clock), config.probe_timeout());
    let monitor = Monitor::new(config.max_records, clock.now());
    let runner = Runner::new(
        config.hostname.clone(),
        prober,
        monitor,
        audit,
        std::io::stdout(),
        config.probe_interval(),
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    match runner.run(shutdown).await {
        Ok(monitor) => {
            let counters = monitor.counters();
            println!(
                "\n🛑 Stopped after {} probes ({} ok, {} slow, {} failed)",
                counters.total(),
                counters.success,
                counters.slow,
                counters.failure
            );
        }
        Err(e) => {
            tracing::error!("Probe loop error: {e}");
            std::process::exit(1);
        }
    }
}
