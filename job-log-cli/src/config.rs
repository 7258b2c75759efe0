//! Configuration loading and parsing
//!
//! Settings come from an optional `config.toml`; command line flags override
//! whatever the file says.

use anyhow::{Context, Result};
use job_log_analyzer::{AnalyzerConfig, Thresholds};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Print run totals after the results
    #[serde(default)]
    pub summary: bool,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One human-readable line per finding
    #[default]
    Text,
    /// One JSON object per finding
    Json,
}

/// Command line values that take precedence over the config file
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub warning_secs: Option<i64>,
    pub error_secs: Option<i64>,
    pub format: Option<OutputFormat>,
    pub summary: bool,
}

impl AppConfig {
    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(secs) = overrides.warning_secs {
            self.thresholds.warning_secs = secs;
        }
        if let Some(secs) = overrides.error_secs {
            self.thresholds.error_secs = secs;
        }
        if let Some(format) = overrides.format {
            self.output.format = format;
        }
        self.output.summary |= overrides.summary;
        self
    }

    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig::new().with_thresholds(self.thresholds)
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    config
        .analyzer_config()
        .validate()
        .with_context(|| format!("Invalid thresholds in config file: {:?}", path))?;

    Ok(config)
}
