//! Event parser
//!
//! Converts one raw line into a START/END event. Record layout:
//!
//! ```text
//! HH:MM:SS,<job name>,<marker containing START or END>,<task id>
//! ```
//!
//! The marker is found by substring search over the whole line, so incidental
//! whitespace around the third field does not matter. Fields are otherwise
//! taken verbatim.

use crate::types::{ClockTime, Event, EventKind, MalformedLine, MalformedReason, RawLine};

/// Number of comma-delimited fields in a record
const FIELD_COUNT: usize = 4;

const START_MARKER: &str = "START";
const END_MARKER: &str = "END";

/// Parse one line into an event
pub fn parse_line(line: &RawLine) -> Result<Event, MalformedLine> {
    let kind = detect_kind(&line.text)
        .ok_or_else(|| malformed(line, MalformedReason::MissingMarker))?;

    let fields: Vec<&str> = line.text.split(',').collect();
    if fields.len() < FIELD_COUNT {
        return Err(malformed(
            line,
            MalformedReason::TooFewFields {
                found: fields.len(),
            },
        ));
    }

    Ok(Event {
        line_number: line.line_number,
        timestamp: ClockTime::new(fields[0]),
        job_name: fields[1].to_string(),
        kind,
        task_id: fields[3].to_string(),
    })
}

/// Parse every line, splitting the result into events and rejects
///
/// Both outputs keep input order.
pub fn parse_lines(lines: &[RawLine]) -> (Vec<Event>, Vec<MalformedLine>) {
    let mut events = Vec::with_capacity(lines.len());
    let mut malformed = Vec::new();

    for line in lines {
        match parse_line(line) {
            Ok(event) => {
                log::trace!(
                    "Line {}: {} for task {:?}",
                    line.line_number,
                    event.kind,
                    event.task_id
                );
                events.push(event);
            }
            Err(e) => {
                log::debug!("Skipping {}", e);
                malformed.push(e);
            }
        }
    }

    log::debug!(
        "Parsed {} events ({} malformed lines)",
        events.len(),
        malformed.len()
    );
    (events, malformed)
}

/// START wins when a line happens to contain both markers
fn detect_kind(text: &str) -> Option<EventKind> {
    if text.contains(START_MARKER) {
        Some(EventKind::Start)
    } else if text.contains(END_MARKER) {
        Some(EventKind::End)
    } else {
        None
    }
}

fn malformed(line: &RawLine, reason: MalformedReason) -> MalformedLine {
    MalformedLine {
        line_number: line.line_number,
        text: line.text.clone(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> RawLine {
        RawLine::new(1, text)
    }

    #[test]
    fn test_parse_start_line() {
        let event = parse_line(&line("11:35:23,scheduled task 032, START,37980")).unwrap();
        assert_eq!(event.kind, EventKind::Start);
        assert_eq!(event.timestamp.as_str(), "11:35:23");
        assert_eq!(event.job_name, "scheduled task 032");
        assert_eq!(event.task_id, "37980");
        assert_eq!(event.line_number, 1);
    }

    #[test]
    fn test_parse_end_line() {
        let event = parse_line(&line("11:35:56,scheduled task 032, END,37980")).unwrap();
        assert_eq!(event.kind, EventKind::End);
        assert_eq!(event.task_id, "37980");
    }

    #[test]
    fn test_fields_are_verbatim() {
        let event = parse_line(&line("10:00:00, padded name ,START, id 7 ")).unwrap();
        assert_eq!(event.job_name, " padded name ");
        assert_eq!(event.task_id, " id 7 ");
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let event = parse_line(&line("10:00:00,job, END,42,trailing,stuff")).unwrap();
        assert_eq!(event.kind, EventKind::End);
        assert_eq!(event.task_id, "42");
    }

    #[test]
    fn test_missing_marker() {
        let err = parse_line(&line("10:00:00,job, RUNNING,42")).unwrap_err();
        assert_eq!(err.reason, MalformedReason::MissingMarker);

        let err = parse_line(&line("")).unwrap_err();
        assert_eq!(err.reason, MalformedReason::MissingMarker);
    }

    #[test]
    fn test_too_few_fields() {
        let err = parse_line(&line("10:00:00,job START")).unwrap_err();
        assert_eq!(err.reason, MalformedReason::TooFewFields { found: 2 });
        assert_eq!(err.text, "10:00:00,job START");
    }

    #[test]
    fn test_start_takes_precedence() {
        let event = parse_line(&line("10:00:00,END of day report, START,9")).unwrap();
        assert_eq!(event.kind, EventKind::Start);
    }

    #[test]
    fn test_bad_time_still_parses() {
        let event = parse_line(&line("not-a-time,job, START,1")).unwrap();
        assert_eq!(event.timestamp.as_str(), "not-a-time");
    }

    #[test]
    fn test_parse_lines_partitions_in_order() {
        let lines = vec![
            RawLine::new(1, "09:00:00,a, START,1"),
            RawLine::new(2, "garbage"),
            RawLine::new(3, "09:01:00,a, END,1"),
            RawLine::new(4, "09:02:00,END"),
        ];

        let (events, malformed) = parse_lines(&lines);
        assert_eq!(
            events.iter().map(|e| e.line_number).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(
            malformed.iter().map(|m| m.line_number).collect::<Vec<_>>(),
            vec![2, 4]
        );
    }
}
