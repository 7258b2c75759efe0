//! Reporting sink
//!
//! The analyzer never prints. Everything worth telling the user goes through a
//! [`Reporter`], which the application implements for its output format.

use crate::config::Thresholds;
use crate::types::{ClassifiedJob, MalformedLine, Severity};
use serde::Serialize;

/// Receives the notable results of an analysis run
///
/// `Normal` jobs are not passed to `job`; they only show up in the summary.
pub trait Reporter {
    /// A line that could not be parsed into an event
    fn malformed_line(&mut self, line: &MalformedLine);

    /// A job classified as `Error`, `Warning` or `Skipped`
    fn job(&mut self, job: &ClassifiedJob, thresholds: &Thresholds);
}

/// One emitted report entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportRecord {
    Error {
        job_name: String,
        task_id: String,
        duration_secs: i64,
        limit_secs: i64,
    },
    Warning {
        job_name: String,
        task_id: String,
        duration_secs: i64,
        limit_secs: i64,
    },
    Skipped {
        line_number: usize,
        job_name: String,
        task_id: String,
        reason: String,
    },
    Malformed {
        line_number: usize,
        text: String,
        reason: String,
    },
}

impl ReportRecord {
    /// Build the record for a classified job, `None` for `Normal`
    pub fn from_job(job: &ClassifiedJob, thresholds: &Thresholds) -> Option<Self> {
        let duration_secs = job.duration_secs.unwrap_or_default();
        match job.severity {
            Severity::Normal => None,
            Severity::Error => Some(ReportRecord::Error {
                job_name: job.job.job_name.clone(),
                task_id: job.job.task_id.clone(),
                duration_secs,
                limit_secs: thresholds.error_secs,
            }),
            Severity::Warning => Some(ReportRecord::Warning {
                job_name: job.job.job_name.clone(),
                task_id: job.job.task_id.clone(),
                duration_secs,
                limit_secs: thresholds.warning_secs,
            }),
            Severity::Skipped => Some(ReportRecord::Skipped {
                line_number: job.job.origin_line,
                job_name: job.job.job_name.clone(),
                task_id: job.job.task_id.clone(),
                reason: job
                    .skip_reason
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            }),
        }
    }

    pub fn from_malformed(line: &MalformedLine) -> Self {
        ReportRecord::Malformed {
            line_number: line.line_number,
            text: line.text.clone(),
            reason: line.reason.to_string(),
        }
    }
}

/// Reporter that keeps every record in memory
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub records: Vec<ReportRecord>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, predicate: impl Fn(&ReportRecord) -> bool) -> usize {
        self.records.iter().filter(|r| predicate(*r)).count()
    }
}

impl Reporter for CollectingReporter {
    fn malformed_line(&mut self, line: &MalformedLine) {
        self.records.push(ReportRecord::from_malformed(line));
    }

    fn job(&mut self, job: &ClassifiedJob, thresholds: &Thresholds) {
        if let Some(record) = ReportRecord::from_job(job, thresholds) {
            self.records.push(record);
        }
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn malformed_line(&mut self, line: &MalformedLine) {
        (**self).malformed_line(line);
    }

    fn job(&mut self, job: &ClassifiedJob, thresholds: &Thresholds) {
        (**self).job(job, thresholds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClockTime, Job, MalformedReason, SkipReason};

    fn classified(severity: Severity, duration_secs: Option<i64>) -> ClassifiedJob {
        ClassifiedJob {
            job: Job {
                task_id: "A1".to_string(),
                job_name: "sync".to_string(),
                start_time: ClockTime::new("09:00:00"),
                end_time: Some(ClockTime::new("09:11:00")),
                origin_line: 3,
            },
            duration_secs,
            severity,
            skip_reason: None,
        }
    }

    #[test]
    fn test_normal_jobs_produce_no_record() {
        let mut reporter = CollectingReporter::new();
        reporter.job(&classified(Severity::Normal, Some(10)), &Thresholds::default());
        assert!(reporter.records.is_empty());
    }

    #[test]
    fn test_error_record_carries_limit() {
        let record = ReportRecord::from_job(
            &classified(Severity::Error, Some(660)),
            &Thresholds::default(),
        );
        assert_eq!(
            record,
            Some(ReportRecord::Error {
                job_name: "sync".to_string(),
                task_id: "A1".to_string(),
                duration_secs: 660,
                limit_secs: 600,
            })
        );
    }

    #[test]
    fn test_skipped_record_names_origin_line() {
        let mut job = classified(Severity::Skipped, None);
        job.skip_reason = Some(SkipReason::MissingEndTime);

        let record = ReportRecord::from_job(&job, &Thresholds::default()).unwrap();
        assert_eq!(
            record,
            ReportRecord::Skipped {
                line_number: 3,
                job_name: "sync".to_string(),
                task_id: "A1".to_string(),
                reason: "no matching END".to_string(),
            }
        );
    }

    #[test]
    fn test_record_json_shape() {
        let record = ReportRecord::from_malformed(&MalformedLine {
            line_number: 4,
            text: "junk".to_string(),
            reason: MalformedReason::MissingMarker,
        });

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "malformed");
        assert_eq!(json["line_number"], 4);
        assert_eq!(json["reason"], "no START or END marker");
    }
}
