//! Append-only audit log of probe attempts.
//!
//! One line per attempt, either human readable:
//!
//! ```text
//! [2024-05-01 12:00:00.123] OK - IPs: [93.184.216.34] - Time: 12.5ms
//! [2024-05-01 12:00:00.180] FAIL - Error: lookup timed out after 5000ms - Time: 5s
//! ```
//!
//! or one JSON object per line. Every line is flushed immediately so the
//! file can be tailed while the probe runs.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::config::AuditFormat;
use crate::error::AuditError;
use crate::probe::{ProbeKind, ProbeOutcome};

/// Timestamp layout used in text lines.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// JSON shape of one audit line.
#[derive(Debug, Serialize)]
struct AuditRecord<'a> {
    timestamp: DateTime<Utc>,
    kind: ProbeKind,
    addresses: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    duration_ms: f64,
}

/// Format one attempt as a text line (without newline).
#[must_use]
pub fn format_text_line(outcome: &ProbeOutcome) -> String {
    let stamp = outcome.timestamp().format(TIMESTAMP_FORMAT);
    let detail = outcome.error().map_or_else(
        || format!("IPs: [{}]", outcome.addresses().join(" ")),
        |err| format!("Error: {err}"),
    );
    format!(
        "[{stamp}] {} - {detail} - Time: {:?}",
        outcome.kind(),
        outcome.duration()
    )
}

/// Format one attempt as a JSON line (without newline).
///
/// # Errors
///
/// Returns [`AuditError::Serialize`] if encoding fails.
#[allow(clippy::cast_precision_loss)]
pub fn format_json_line(outcome: &ProbeOutcome) -> Result<String, AuditError> {
    let record = AuditRecord {
        timestamp: outcome.timestamp(),
        kind: outcome.kind(),
        addresses: outcome.addresses(),
        error: outcome.error().map(ToString::to_string),
        duration_ms: outcome.duration().as_micros() as f64 / 1000.0,
    };
    serde_json::to_string(&record).map_err(|e| AuditError::Serialize {
        message: e.to_string(),
    })
}

/// Line-oriented audit log file.
#[derive(Debug)]
pub struct AuditLog {
    path: PathBuf,
    format: AuditFormat,
    writer: BufWriter<File>,
}

impl AuditLog {
    /// Open `path` for appending, creating it if missing.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Open`] if the file cannot be opened.
    pub async fn open(path: impl AsRef<Path>, format: AuditFormat) -> Result<Self, AuditError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| AuditError::Open {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            path,
            format,
            writer: BufWriter::new(file),
        })
    }

    /// Path of the log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append and flush one line for `outcome`.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError`] if the line cannot be encoded or written.
    pub async fn record(&mut self, outcome: &ProbeOutcome) -> Result<(), AuditError> {
        let mut line = match self.format {
            AuditFormat::Text => format_text_line(outcome),
            AuditFormat::Json => format_json_line(outcome)?,
        };
        line.push('\n');

        self.writer
            .write_all(line.as_bytes())
            .await
            .map_err(write_error)?;
        self.writer.flush().await.map_err(write_error)
    }

    /// Flush anything still buffered.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Write`] if flushing fails.
    pub async fn flush(&mut self) -> Result<(), AuditError> {
        self.writer.flush().await.map_err(write_error)
    }
}

#[allow(clippy::needless_pass_by_value)]
fn write_error(e: std::io::Error) -> AuditError {
    AuditError::Write {
        message: e.to_string(),
    }
}
