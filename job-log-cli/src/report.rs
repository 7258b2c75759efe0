//! Report output
//!
//! Writes analyzer findings as plain text lines or JSON lines.

use job_log_analyzer::{
    describe_limit, ClassifiedJob, MalformedLine, ReportRecord, Reporter, Summary, Thresholds,
};
use serde::Serialize;
use std::io::{self, Write};

/// Render one finding as a text line
pub fn format_record(record: &ReportRecord) -> String {
    match record {
        ReportRecord::Error {
            job_name,
            task_id,
            duration_secs,
            limit_secs,
        } => format!(
            "ERROR: Job {} with Task ID {} exceeded {} ({:.1} seconds)",
            job_name,
            task_id,
            describe_limit(*limit_secs),
            *duration_secs as f64
        ),
        ReportRecord::Warning {
            job_name,
            task_id,
            duration_secs,
            ..
        } => format!(
            "WARNING: Job {} with Task ID {} took too long: {:.1} seconds",
            job_name, task_id, *duration_secs as f64
        ),
        ReportRecord::Skipped {
            line_number,
            task_id,
            reason,
            ..
        } => format!(
            "SKIPPED: incomplete job at line {} (Task ID {}): {}",
            line_number, task_id, reason
        ),
        ReportRecord::Malformed {
            line_number,
            text,
            reason,
        } => format!(
            "SKIPPED: malformed line {}: {} → {}",
            line_number, reason, text
        ),
    }
}

/// Plain text reporter (one line per finding)
pub struct TextReporter<W: Write> {
    out: W,
    result: io::Result<()>,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, result: Ok(()) }
    }

    fn emit(&mut self, record: &ReportRecord) {
        if self.result.is_ok() {
            self.result = writeln!(self.out, "{}", format_record(record));
        }
    }

    /// Print run totals
    ///
    /// Nothing is written once an earlier record has failed to write.
    pub fn summary(&mut self, summary: &Summary) -> io::Result<()> {
        if let Err(e) = &self.result {
            return Err(io::Error::new(e.kind(), e.to_string()));
        }
        let out = &mut self.out;
        writeln!(out)?;
        writeln!(out, "═══════════════════════════════════════════════")?;
        writeln!(out, "  Job Log Summary")?;
        writeln!(out, "═══════════════════════════════════════════════")?;
        writeln!(out, "  Lines:           {}", summary.lines)?;
        writeln!(out, "  Malformed lines: {}", summary.malformed_lines)?;
        writeln!(out, "  Jobs:            {}", summary.jobs)?;
        writeln!(out, "    Errors:        {}", summary.errors)?;
        writeln!(out, "    Warnings:      {}", summary.warnings)?;
        writeln!(out, "    Normal:        {}", summary.normal)?;
        writeln!(out, "    Skipped:       {}", summary.skipped)?;
        writeln!(out, "  Unmatched ENDs:  {}", summary.unmatched_ends)?;
        Ok(())
    }

    /// Flush output and surface the first write error, if any
    pub fn finish(mut self) -> io::Result<()> {
        self.result?;
        self.out.flush()
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn malformed_line(&mut self, line: &MalformedLine) {
        self.emit(&ReportRecord::from_malformed(line));
    }

    fn job(&mut self, job: &ClassifiedJob, thresholds: &Thresholds) {
        if let Some(record) = ReportRecord::from_job(job, thresholds) {
            self.emit(&record);
        }
    }
}

/// JSON lines reporter (one object per finding)
pub struct JsonReporter<W: Write> {
    out: W,
    result: io::Result<()>,
}

#[derive(Serialize)]
struct SummaryRecord<'a> {
    kind: &'static str,
    #[serde(flatten)]
    summary: &'a Summary,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, result: Ok(()) }
    }

    fn emit<T: Serialize>(&mut self, value: &T) {
        if self.result.is_ok() {
            self.result = write_json_line(&mut self.out, value);
        }
    }

    pub fn summary(&mut self, summary: &Summary) -> io::Result<()> {
        if let Err(e) = &self.result {
            return Err(io::Error::new(e.kind(), e.to_string()));
        }
        write_json_line(
            &mut self.out,
            &SummaryRecord {
                kind: "summary",
                summary,
            },
        )
    }

    pub fn finish(mut self) -> io::Result<()> {
        self.result?;
        self.out.flush()
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn malformed_line(&mut self, line: &MalformedLine) {
        self.emit(&ReportRecord::from_malformed(line));
    }

    fn job(&mut self, job: &ClassifiedJob, thresholds: &Thresholds) {
        if let Some(record) = ReportRecord::from_job(job, thresholds) {
            self.emit(&record);
        }
    }
}

fn write_json_line<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)
}
