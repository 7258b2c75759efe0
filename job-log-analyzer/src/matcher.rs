//! Job matcher
//!
//! Pairs START and END events by task id. Each task id owns a FIFO queue of
//! its still-open jobs; an END closes the oldest one. Events must be fed in
//! log order (ascending line number).
//!
//! An END with no open job for its task id is dropped without side effects.
//! Jobs that never see an END stay open and are still returned.

use crate::types::{Event, EventKind, Job};
use std::collections::{HashMap, VecDeque};

/// Counters collected while matching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    /// START events seen (one job each)
    pub starts: usize,
    /// END events seen, matched or not
    pub ends: usize,
    /// END events that found no open job
    pub unmatched_ends: usize,
}

impl MatchStats {
    pub fn matched_ends(&self) -> usize {
        self.ends - self.unmatched_ends
    }
}

/// Streaming matcher over an ordered event sequence
#[derive(Debug, Default)]
pub struct JobMatcher {
    /// Jobs in START order
    jobs: Vec<Job>,
    /// task id -> indices into `jobs` of open jobs, oldest first
    open: HashMap<String, VecDeque<usize>>,
    stats: MatchStats,
}

impl JobMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next event in log order
    pub fn push(&mut self, event: &Event) {
        match event.kind {
            EventKind::Start => self.open_job(event),
            EventKind::End => self.close_job(event),
        }
    }

    fn open_job(&mut self, event: &Event) {
        self.stats.starts += 1;

        let index = self.jobs.len();
        self.jobs.push(Job::from_start(event));
        self.open
            .entry(event.task_id.clone())
            .or_default()
            .push_back(index);
    }

    fn close_job(&mut self, event: &Event) {
        self.stats.ends += 1;

        let index = self
            .open
            .get_mut(&event.task_id)
            .and_then(|queue| queue.pop_front());

        match index {
            Some(index) => {
                let job = &mut self.jobs[index];
                debug_assert!(job.end_time.is_none());
                job.end_time = Some(event.timestamp.clone());
                log::trace!(
                    "Line {} closes job from line {} (task {:?})",
                    event.line_number,
                    job.origin_line,
                    event.task_id
                );
            }
            None => {
                self.stats.unmatched_ends += 1;
                log::debug!(
                    "Line {}: END for task {:?} has no open job, ignoring",
                    event.line_number,
                    event.task_id
                );
            }
        }
    }

    /// Number of jobs still waiting for an END
    pub fn open_count(&self) -> usize {
        self.open.values().map(VecDeque::len).sum()
    }

    /// Consume the matcher, returning jobs in START order
    pub fn finish(self) -> (Vec<Job>, MatchStats) {
        log::debug!(
            "Matched {} jobs ({} END events, {} unmatched)",
            self.jobs.len(),
            self.stats.ends,
            self.stats.unmatched_ends
        );
        (self.jobs, self.stats)
    }
}

/// Match a full event sequence in one pass
pub fn match_events<'a, I>(events: I) -> (Vec<Job>, MatchStats)
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut matcher = JobMatcher::new();
    for event in events {
        matcher.push(event);
    }
    matcher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClockTime;

    fn event(line_number: usize, time: &str, kind: EventKind, task_id: &str) -> Event {
        Event {
            line_number,
            timestamp: ClockTime::new(time),
            job_name: format!("job {}", task_id),
            kind,
            task_id: task_id.to_string(),
        }
    }

    fn end_times(jobs: &[Job]) -> Vec<Option<&str>> {
        jobs.iter()
            .map(|j| j.end_time.as_ref().map(ClockTime::as_str))
            .collect()
    }

    #[test]
    fn test_simple_pair() {
        let events = vec![
            event(1, "11:35:23", EventKind::Start, "37980"),
            event(2, "11:35:56", EventKind::End, "37980"),
        ];

        let (jobs, _) = match_events(&events);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].start_time.as_str(), "11:35:23");
        assert_eq!(end_times(&jobs), vec![Some("11:35:56")]);
        assert_eq!(jobs[0].origin_line, 1);
    }

    #[test]
    fn test_fifo_per_task_id_with_interleaving() {
        let events = vec![
            event(1, "10:00:00", EventKind::Start, "B2"),
            event(2, "10:00:01", EventKind::Start, "X"),
            event(3, "10:00:05", EventKind::Start, "B2"),
            event(4, "10:00:06", EventKind::End, "X"),
            event(5, "10:00:10", EventKind::End, "B2"),
            event(6, "10:00:20", EventKind::End, "B2"),
        ];

        let (jobs, stats) = match_events(&events);
        assert_eq!(stats, MatchStats { starts: 3, ends: 3, unmatched_ends: 0 });
        assert_eq!(
            jobs.iter().map(|j| j.origin_line).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(
            end_times(&jobs),
            vec![Some("10:00:10"), Some("10:00:06"), Some("10:00:20")]
        );
    }

    #[test]
    fn test_unmatched_end_is_ignored() {
        let events = vec![
            event(1, "09:00:00", EventKind::End, "ghost"),
            event(2, "09:00:01", EventKind::Start, "A1"),
        ];

        let mut matcher = JobMatcher::new();
        for e in &events {
            matcher.push(e);
        }
        assert_eq!(matcher.open_count(), 1);

        let (jobs, stats) = matcher.finish();
        assert_eq!(jobs.len(), 1);
        assert!(jobs[0].end_time.is_none());
        assert_eq!(stats.unmatched_ends, 1);
        assert_eq!(stats.matched_ends(), 0);
    }

    #[test]
    fn test_end_before_start_does_not_close_later_job() {
        let events = vec![
            event(1, "09:00:00", EventKind::End, "A1"),
            event(2, "09:00:05", EventKind::Start, "A1"),
        ];

        let (jobs, _) = match_events(&events);
        assert_eq!(end_times(&jobs), vec![None]);
    }

    #[test]
    fn test_extra_end_is_dropped_and_first_end_wins() {
        let events = vec![
            event(1, "09:00:00", EventKind::Start, "A1"),
            event(2, "09:01:00", EventKind::End, "A1"),
            event(3, "09:02:00", EventKind::End, "A1"),
        ];

        let mut matcher = JobMatcher::new();
        events.iter().for_each(|e| matcher.push(e));
        let (jobs, stats) = matcher.finish();

        assert_eq!(end_times(&jobs), vec![Some("09:01:00")]);
        assert_eq!(stats, MatchStats { starts: 1, ends: 2, unmatched_ends: 1 });
    }

    #[test]
    fn test_task_id_reuse_after_close() {
        let events = vec![
            event(1, "09:00:00", EventKind::Start, "A1"),
            event(2, "09:01:00", EventKind::End, "A1"),
            event(3, "09:02:00", EventKind::Start, "A1"),
            event(4, "09:03:00", EventKind::End, "A1"),
        ];

        let (jobs, _) = match_events(&events);
        assert_eq!(end_times(&jobs), vec![Some("09:01:00"), Some("09:03:00")]);
    }

    #[test]
    fn test_start_without_end_stays_open() {
        let events = vec![
            event(1, "10:00:00", EventKind::Start, "B2"),
            event(2, "10:00:05", EventKind::Start, "B2"),
            event(3, "10:00:10", EventKind::End, "B2"),
        ];

        let (jobs, _) = match_events(&events);
        assert_eq!(end_times(&jobs), vec![Some("10:00:10"), None]);
    }

    #[test]
    fn test_empty_input() {
        let (jobs, stats) = match_events(&Vec::<Event>::new());
        assert!(jobs.is_empty());
        assert_eq!(stats, MatchStats::default());
    }
}
