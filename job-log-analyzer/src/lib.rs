//! Job Log Analyzer Library
//!
//! A stateless library for reconstructing scheduled-task runs from a job event
//! log and flagging the ones that ran too long.
//!
//! # Architecture
//!
//! Each run is a one-shot batch pipeline:
//! - Reads the log into numbered lines
//! - Parses each line into a START/END event (bad lines are reported, not fatal)
//! - Pairs events into jobs by task id (oldest open job first)
//! - Classifies each job by duration against warning/error thresholds
//!
//! The library does NOT:
//! - Print anything (results go through a [`Reporter`])
//! - Keep state between runs
//! - Handle dates, time zones or runs crossing midnight
//!
//! Output formatting lives in the application layer (job-log-cli).
//!
//! # Example Usage
//!
//! ```
//! use job_log_analyzer::{lines_from_str, Analyzer, AnalyzerConfig, CollectingReporter, Severity};
//!
//! let lines = lines_from_str(
//!     "09:00:00,nightly export, START,A1\n\
//!      09:11:00,nightly export, END,A1\n",
//! );
//!
//! let analyzer = Analyzer::with_config(AnalyzerConfig::new().with_warning_secs(300)).unwrap();
//! let mut reporter = CollectingReporter::new();
//! let analysis = analyzer.analyze_lines(&lines, &mut reporter);
//!
//! assert_eq!(analysis.jobs[0].severity, Severity::Error);
//! assert_eq!(reporter.records.len(), 1);
//! ```

// Public modules
pub mod analyzer;
pub mod classifier;
pub mod config;
pub mod matcher;
pub mod parser;
pub mod report;
pub mod source;
pub mod types;

// Re-export main types for convenience
pub use analyzer::{Analysis, Analyzer, Summary};
pub use classifier::{classify, describe_limit};
pub use config::{AnalyzerConfig, Thresholds};
pub use matcher::{match_events, JobMatcher, MatchStats};
pub use parser::{parse_line, parse_lines};
pub use report::{CollectingReporter, ReportRecord, Reporter};
pub use source::{lines_from_str, read_lines, read_log_file};
pub use types::{
    AnalyzerError, ClassifiedJob, ClockTime, Event, EventKind, Job, MalformedLine,
    MalformedReason, RawLine, Result, Severity, SkipReason,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
