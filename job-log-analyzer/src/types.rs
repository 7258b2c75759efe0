//! Core types for the job log analyzer
//!
//! This module defines the records that flow through the pipeline: raw lines from
//! the log, parsed START/END events, reconstructed jobs and their classification.
//! None of these types carry state between runs.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Result type for analyzer operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Format of the time field in a log record (24-hour, no date, no zone)
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Errors that abort an analysis run
///
/// Per-line and per-job problems (malformed lines, incomplete jobs, bad
/// timestamps) are not errors at this level; they are reported and skipped.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("Failed to read log file {path:?}: {source}")]
    Ingestion {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Log file {path:?} is not valid UTF-8 at line {line}")]
    InvalidEncoding { path: PathBuf, line: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One physical line of the input log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLine {
    /// 1-based line number
    pub line_number: usize,
    /// Line text without its trailing terminator
    pub text: String,
}

impl RawLine {
    pub fn new(line_number: usize, text: impl Into<String>) -> Self {
        Self {
            line_number,
            text: text.into(),
        }
    }
}

/// Time-of-day text exactly as it appeared in the log
///
/// Parsing is deferred until classification so an unreadable timestamp still
/// produces a job (which is then skipped) instead of vanishing at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClockTime(String);

impl ClockTime {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse as `HH:MM:SS`
    pub fn to_naive_time(&self) -> std::result::Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(&self.0, TIME_FORMAT)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status marker carried by an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventKind {
    Start,
    End,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Start => write!(f, "START"),
            EventKind::End => write!(f, "END"),
        }
    }
}

/// A START or END marker extracted from one log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub line_number: usize,
    pub timestamp: ClockTime,
    pub job_name: String,
    pub kind: EventKind,
    pub task_id: String,
}

/// Why a line could not be turned into an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum MalformedReason {
    #[error("no START or END marker")]
    MissingMarker,

    #[error("expected 4 comma-separated fields, found {found}")]
    TooFewFields { found: usize },
}

/// A line rejected by the event parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("malformed line {line_number}: {reason}")]
pub struct MalformedLine {
    pub line_number: usize,
    pub text: String,
    pub reason: MalformedReason,
}

/// Reconstructed record of one task execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub task_id: String,
    pub job_name: String,
    pub start_time: ClockTime,
    /// Set at most once, by the first matching END
    pub end_time: Option<ClockTime>,
    /// Line of the START event that created this job
    pub origin_line: usize,
}

impl Job {
    /// Create an open job from its START event
    pub fn from_start(event: &Event) -> Self {
        Self {
            task_id: event.task_id.clone(),
            job_name: event.job_name.clone(),
            start_time: event.timestamp.clone(),
            end_time: None,
            origin_line: event.line_number,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.end_time.is_some()
    }
}

/// Duration classification of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Warning,
    Error,
    Skipped,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Normal => "NORMAL",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Skipped => "SKIPPED",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a job could not be classified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    MissingStartTime,
    MissingEndTime,
    InvalidTime { value: String, message: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingStartTime => write!(f, "missing start time"),
            SkipReason::MissingEndTime => write!(f, "no matching END"),
            SkipReason::InvalidTime { value, message } => {
                write!(f, "invalid time {:?} ({})", value, message)
            }
        }
    }
}

/// A job with its measured duration and severity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedJob {
    pub job: Job,
    /// Whole seconds from start to end; `None` when skipped
    pub duration_secs: Option<i64>,
    pub severity: Severity,
    /// Present exactly when `severity` is `Skipped`
    pub skip_reason: Option<SkipReason>,
}

impl ClassifiedJob {
    pub fn skipped(job: Job, reason: SkipReason) -> Self {
        Self {
            job,
            duration_secs: None,
            severity: Severity::Skipped,
            skip_reason: Some(reason),
        }
    }
}
