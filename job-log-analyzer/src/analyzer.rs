//! Main analyzer API
//!
//! This module provides the primary interface for the library. An [`Analyzer`]
//! runs the whole batch pipeline over a line sequence:
//!
//! 1. Parse every line into an event (malformed lines are reported and dropped)
//! 2. Match START/END events into jobs
//! 3. Classify every job by duration
//! 4. Hand warnings, errors and skipped jobs to the reporter

use crate::classifier;
use crate::config::{AnalyzerConfig, Thresholds};
use crate::matcher::{self, MatchStats};
use crate::parser;
use crate::report::Reporter;
use crate::source;
use crate::types::{ClassifiedJob, MalformedLine, RawLine, Result, Severity};
use serde::Serialize;
use std::path::Path;

/// Entry point for analysis runs
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Create an analyzer with default thresholds (300s / 600s)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer from a configuration, rejecting inverted thresholds
    pub fn with_config(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.config.thresholds
    }

    /// Read a log file and analyze it
    ///
    /// # Example
    /// ```no_run
    /// use job_log_analyzer::{Analyzer, CollectingReporter};
    /// use std::path::Path;
    ///
    /// let analyzer = Analyzer::new();
    /// let mut reporter = CollectingReporter::new();
    /// let analysis = analyzer.analyze_file(Path::new("jobs.log"), &mut reporter).unwrap();
    /// println!("{} jobs", analysis.jobs.len());
    /// ```
    pub fn analyze_file<R: Reporter>(&self, path: &Path, reporter: R) -> Result<Analysis> {
        let lines = source::read_log_file(path)?;
        Ok(self.analyze_lines(&lines, reporter))
    }

    /// Analyze an already ingested line sequence
    pub fn analyze_lines<R: Reporter>(&self, lines: &[RawLine], mut reporter: R) -> Analysis {
        log::info!("Analyzing {} lines", lines.len());
        let thresholds = &self.config.thresholds;

        let (events, malformed) = parser::parse_lines(lines);
        for line in &malformed {
            reporter.malformed_line(line);
        }

        let (jobs, match_stats) = matcher::match_events(&events);

        let jobs = classifier::classify_all(&jobs, thresholds);
        for job in &jobs {
            match job.severity {
                Severity::Normal => {}
                Severity::Skipped => {
                    log::debug!(
                        "Skipping job from line {}: {}",
                        job.job.origin_line,
                        job.skip_reason
                            .as_ref()
                            .map(ToString::to_string)
                            .unwrap_or_default()
                    );
                    reporter.job(job, thresholds);
                }
                Severity::Warning | Severity::Error => reporter.job(job, thresholds),
            }
        }

        let analysis = Analysis {
            line_count: lines.len(),
            event_count: events.len(),
            malformed,
            jobs,
            match_stats,
        };
        log::info!("Analysis complete: {}", analysis.summary());
        analysis
    }
}

/// Everything produced by one run
#[derive(Debug, Clone)]
pub struct Analysis {
    pub line_count: usize,
    pub event_count: usize,
    pub malformed: Vec<MalformedLine>,
    /// Classified jobs in START order
    pub jobs: Vec<ClassifiedJob>,
    pub match_stats: MatchStats,
}

impl Analysis {
    pub fn count(&self, severity: Severity) -> usize {
        self.jobs.iter().filter(|j| j.severity == severity).count()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            lines: self.line_count,
            events: self.event_count,
            malformed_lines: self.malformed.len(),
            jobs: self.jobs.len(),
            normal: self.count(Severity::Normal),
            warnings: self.count(Severity::Warning),
            errors: self.count(Severity::Error),
            skipped: self.count(Severity::Skipped),
            unmatched_ends: self.match_stats.unmatched_ends,
        }
    }
}

/// Counts for a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub lines: usize,
    pub events: usize,
    pub malformed_lines: usize,
    pub jobs: usize,
    pub normal: usize,
    pub warnings: usize,
    pub errors: usize,
    pub skipped: usize,
    pub unmatched_ends: usize,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} jobs ({} errors, {} warnings, {} normal, {} skipped), {} malformed lines",
            self.jobs, self.errors, self.warnings, self.normal, self.skipped, self.malformed_lines
        )
    }
}
