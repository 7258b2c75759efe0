//! Analyzer configuration types
//!
//! This module defines the minimal configuration needed by the analyzer library:
//! the duration thresholds used by the classifier. Output formatting and file
//! handling belong to the application layer.

use crate::types::{AnalyzerError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for an analysis run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Duration thresholds for classification
    #[serde(default)]
    pub thresholds: Thresholds,
}

/// Duration thresholds in seconds
///
/// A job is a warning when its duration is strictly above `warning_secs`, and an
/// error when strictly above `error_secs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Jobs running longer than this are warnings (default: 300s)
    #[serde(default = "default_warning_secs")]
    pub warning_secs: i64,

    /// Jobs running longer than this are errors (default: 600s)
    #[serde(default = "default_error_secs")]
    pub error_secs: i64,
}

fn default_warning_secs() -> i64 {
    300
}

fn default_error_secs() -> i64 {
    600
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warning_secs: default_warning_secs(),
            error_secs: default_error_secs(),
        }
    }
}

impl Thresholds {
    pub fn new(warning_secs: i64, error_secs: i64) -> Self {
        Self {
            warning_secs,
            error_secs,
        }
    }

    /// Check that the warning band is non-empty
    pub fn validate(&self) -> Result<()> {
        if self.warning_secs < 0 {
            return Err(AnalyzerError::InvalidConfig(format!(
                "warning threshold must not be negative (got {}s)",
                self.warning_secs
            )));
        }
        if self.warning_secs >= self.error_secs {
            return Err(AnalyzerError::InvalidConfig(format!(
                "warning threshold ({}s) must be below error threshold ({}s)",
                self.warning_secs, self.error_secs
            )));
        }
        Ok(())
    }
}

impl AnalyzerConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the warning threshold
    pub fn with_warning_secs(mut self, secs: i64) -> Self {
        self.thresholds.warning_secs = secs;
        self
    }

    /// Builder method: set the error threshold
    pub fn with_error_secs(mut self, secs: i64) -> Self {
        self.thresholds.error_secs = secs;
        self
    }

    /// Builder method: replace both thresholds
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()
    }
}
