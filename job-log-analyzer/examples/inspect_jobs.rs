//! Standalone job listing tool
//!
//! Prints every reconstructed job with its duration and severity, including the
//! normal ones the CLI stays quiet about.
//!
//! Usage:
//!   cargo run --example inspect_jobs -- <jobs.log>

use job_log_analyzer::{Analyzer, CollectingReporter, Severity};
use std::env;
use std::path::PathBuf;

fn main() {
    env_logger::init();

    let Some(path) = env::args().nth(1).map(PathBuf::from) else {
        eprintln!("Usage: inspect_jobs <jobs.log>");
        std::process::exit(1);
    };

    let analysis = match Analyzer::new().analyze_file(&path, CollectingReporter::new()) {
        Ok(analysis) => analysis,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("{:>6}  {:<10}  {:<24}  {:>9}  {}", "LINE", "TASK", "JOB", "SECONDS", "SEVERITY");
    for job in &analysis.jobs {
        let duration = match job.duration_secs {
            Some(d) => d.to_string(),
            None => "-".to_string(),
        };
        println!(
            "{:>6}  {:<10}  {:<24}  {:>9}  {}",
            job.job.origin_line,
            job.job.task_id,
            job.job.job_name.trim(),
            duration,
            job.severity
        );
    }

    let open = analysis.count(Severity::Skipped);
    println!("\n{}", analysis.summary());
    if open > 0 {
        println!("{} job(s) could not be timed", open);
    }
}
