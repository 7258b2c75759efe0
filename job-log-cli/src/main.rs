//! Job Log Analyzer CLI Application
//!
//! This is the command-line interface for the job log analyzer.
//! It uses the job-log-analyzer library and adds:
//! - Argument parsing and logging setup
//! - TOML configuration with command line overrides
//! - Text and JSON report output

use anyhow::{Context, Result};
use clap::Parser;
use job_log_analyzer::{Analyzer, Summary};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

mod config;
mod report;

use config::{AppConfig, OutputFormat, Overrides};
use report::{JsonReporter, TextReporter};

/// Job Log Analyzer - Pair START/END records and flag long-running jobs
#[derive(Parser, Debug)]
#[command(name = "job-log-cli")]
#[command(about = "Find scheduled jobs that ran too long in a job event log", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the job log file
    #[arg(value_name = "LOG_FILE")]
    log: Option<PathBuf>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Warn about jobs running longer than this many seconds
    #[arg(long, value_name = "SECS")]
    warn_after: Option<i64>,

    /// Report an error for jobs running longer than this many seconds
    #[arg(long, value_name = "SECS")]
    error_after: Option<i64>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Print run totals after the results
    #[arg(short, long)]
    summary: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::debug!("Job Log Analyzer CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using analyzer library v{}", job_log_analyzer::VERSION);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    dispatch(&args, &mut out)
}

/// Resolve settings from the arguments and run, or print usage without a log file
fn dispatch<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let Some(log_path) = &args.log else {
        print_usage(out)?;
        return Ok(());
    };

    let file_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    let config = file_config.apply(Overrides {
        warning_secs: args.warn_after,
        error_secs: args.error_after,
        format: args.format,
        summary: args.summary,
    });
    log::debug!("Effective configuration: {:?}", config);

    run(log_path, &config, out)
}

/// Analyze one log file and write the findings to `out`
fn run<W: Write>(log_path: &Path, config: &AppConfig, out: &mut W) -> Result<()> {
    let analyzer =
        Analyzer::with_config(config.analyzer_config()).context("Invalid thresholds")?;

    match config.output.format {
        OutputFormat::Text => {
            let mut reporter = TextReporter::new(out);
            let analysis = analyze(&analyzer, log_path, &mut reporter)?;
            if config.output.summary {
                reporter.summary(&analysis)?;
            }
            reporter.finish().context("Failed to write report")?;
        }
        OutputFormat::Json => {
            let mut reporter = JsonReporter::new(out);
            let analysis = analyze(&analyzer, log_path, &mut reporter)?;
            if config.output.summary {
                reporter.summary(&analysis)?;
            }
            reporter.finish().context("Failed to write report")?;
        }
    }

    Ok(())
}

fn analyze<R: job_log_analyzer::Reporter>(
    analyzer: &Analyzer,
    log_path: &Path,
    reporter: R,
) -> Result<Summary> {
    let analysis = analyzer
        .analyze_file(log_path, reporter)
        .with_context(|| format!("Failed to analyze log file: {:?}", log_path))?;
    Ok(analysis.summary())
}

fn print_usage<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Job Log Analyzer - No input specified")?;
    writeln!(out, "\nUsage: job-log-cli <LOG_FILE>")?;
    writeln!(out, "\nExamples:")?;
    writeln!(out, "  job-log-cli jobs.log")?;
    writeln!(out, "  job-log-cli jobs.log --warn-after 120 --error-after 300")?;
    writeln!(out, "  job-log-cli jobs.log --config config.toml --format json")?;
    writeln!(out, "\nUse --help for more options")
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_positional_log() {
        let args = Args::parse_from(["job-log-cli", "jobs.log", "--warn-after", "60", "-s"]);
        assert_eq!(args.log, Some(PathBuf::from("jobs.log")));
        assert_eq!(args.warn_after, Some(60));
        assert!(args.summary);
        assert_eq!(args.format, None);
    }

    #[test]
    fn test_args_without_log_file() {
        let args = Args::parse_from(["job-log-cli"]);
        assert!(args.log.is_none());
    }

    #[test]
    fn test_args_format_values() {
        let args = Args::parse_from(["job-log-cli", "jobs.log", "--format", "json"]);
        assert_eq!(args.format, Some(OutputFormat::Json));

        assert!(Args::try_parse_from(["job-log-cli", "jobs.log", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_run_rejects_inverted_overrides() {
        let config = AppConfig::default().apply(Overrides {
            warning_secs: Some(700),
            ..Overrides::default()
        });
        let mut out = Vec::new();
        assert!(run(Path::new("unused.log"), &config, &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_missing_log_file_fails() {
        let mut out = Vec::new();
        assert!(run(Path::new("definitely-missing.log"), &AppConfig::default(), &mut out).is_err());
    }

    #[test]
    fn test_dispatch_without_log_file_prints_usage() {
        // The config file does not exist: loading it would fail the run
        let args = Args::parse_from(["job-log-cli", "--config", "no-such-config.toml"]);
        let mut out = Vec::new();

        dispatch(&args, &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Usage: job-log-cli <LOG_FILE>"));
        assert!(!output.contains("ERROR:"));
        assert!(!output.contains("SKIPPED:"));
    }

    #[test]
    fn test_dispatch_reports_findings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "09:00:00,nightly export, START,A1").unwrap();
        writeln!(file, "09:11:00,nightly export, END,A1").unwrap();

        let path = file.path().to_str().unwrap();
        let args = Args::parse_from(["job-log-cli", path, "--summary"]);
        let mut out = Vec::new();

        dispatch(&args, &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.starts_with(
            "ERROR: Job nightly export with Task ID A1 exceeded 10 minutes (660.0 seconds)\n"
        ));
        assert!(output.contains("Job Log Summary"));
        assert!(!output.contains("Usage:"));
    }
}
