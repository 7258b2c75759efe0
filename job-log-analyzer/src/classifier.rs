//! Duration classifier
//!
//! Measures each job and sorts it into a severity band. Start and end are
//! treated as times on the same day: an END earlier than its START gives a
//! negative duration (and therefore `Normal`), there is no midnight rollover.

use crate::config::Thresholds;
use crate::types::{ClassifiedJob, ClockTime, Job, Severity, SkipReason};
use chrono::NaiveTime;

/// Classify one job against the given thresholds
pub fn classify(job: &Job, thresholds: &Thresholds) -> ClassifiedJob {
    let end = match &job.end_time {
        Some(end) => end,
        None => return ClassifiedJob::skipped(job.clone(), SkipReason::MissingEndTime),
    };

    if job.start_time.as_str().is_empty() {
        return ClassifiedJob::skipped(job.clone(), SkipReason::MissingStartTime);
    }
    if end.as_str().is_empty() {
        return ClassifiedJob::skipped(job.clone(), SkipReason::MissingEndTime);
    }

    let (start, end) = match (parse_time(&job.start_time), parse_time(end)) {
        (Ok(start), Ok(end)) => (start, end),
        (Err(reason), _) | (_, Err(reason)) => {
            return ClassifiedJob::skipped(job.clone(), reason);
        }
    };

    let duration = end.signed_duration_since(start).num_seconds();
    if duration < 0 {
        log::debug!(
            "Job {:?} (task {:?}) ends before it starts: {}s",
            job.job_name,
            job.task_id,
            duration
        );
    }

    ClassifiedJob {
        job: job.clone(),
        duration_secs: Some(duration),
        severity: severity_for(duration, thresholds),
        skip_reason: None,
    }
}

/// Classify every job, preserving order
pub fn classify_all(jobs: &[Job], thresholds: &Thresholds) -> Vec<ClassifiedJob> {
    jobs.iter().map(|job| classify(job, thresholds)).collect()
}

/// Severity band for a duration in seconds
///
/// Both bounds are exclusive: exactly `warning_secs` is normal, exactly
/// `error_secs` is a warning.
pub fn severity_for(duration_secs: i64, thresholds: &Thresholds) -> Severity {
    if duration_secs > thresholds.error_secs {
        Severity::Error
    } else if duration_secs > thresholds.warning_secs {
        Severity::Warning
    } else {
        Severity::Normal
    }
}

/// Human wording for a threshold, e.g. "10 minutes" or "90 seconds"
pub fn describe_limit(secs: i64) -> String {
    match secs {
        60 => "1 minute".to_string(),
        s if s > 0 && s % 60 == 0 => format!("{} minutes", s / 60),
        1 => "1 second".to_string(),
        s => format!("{} seconds", s),
    }
}

fn parse_time(time: &ClockTime) -> Result<NaiveTime, SkipReason> {
    time.to_naive_time().map_err(|e| SkipReason::InvalidTime {
        value: time.as_str().to_string(),
        message: e.to_string(),
    })
}
