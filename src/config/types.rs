//! Configuration types.

use crate::format::OutputFormat;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Minutes in a day; UTC offsets must stay strictly inside this.
const MINUTES_PER_DAY: i32 = 24 * 60;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

/// Where list data is read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Directory holding `<list_id>.json[.gz]` snapshots.
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: PathBuf,

    /// Lists tracked by default.
    #[serde(default)]
    pub list_ids: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            snapshot_dir: default_snapshot_dir(),
            list_ids: Vec::new(),
        }
    }
}

fn default_snapshot_dir() -> PathBuf {
    PathBuf::from("snapshots")
}

/// Reporting defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format: "markdown" or "json".
    #[serde(default = "default_format")]
    pub format: String,

    /// Default period: the last N days (inclusive of today) when no
    /// explicit dates are given.
    #[serde(default)]
    pub period_days: Option<u32>,

    /// Offset from UTC, in minutes, used to cut days for the period.
    #[serde(default)]
    pub utc_offset_minutes: i32,

    /// Truncate the workload ranking to this many members.
    #[serde(default)]
    pub top_members: Option<usize>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            period_days: None,
            utc_offset_minutes: 0,
            top_members: None,
        }
    }
}

fn default_format() -> String {
    "markdown".to_string()
}

impl ReportConfig {
    pub fn output_format(&self) -> Option<OutputFormat> {
        OutputFormat::from_str(&self.format)
    }
}

impl Config {
    /// Load a single configuration file (no tier merging).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        // Empty or comment-only files parse as null
        let config: Option<Config> = serde_yaml::from_str(&content)?;
        Ok(config.unwrap_or_default())
    }

    /// Check values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<()> {
        if self.report.output_format().is_none() {
            return Err(anyhow!(
                "report.format must be 'markdown' or 'json', got '{}'",
                self.report.format
            ));
        }
        if self.report.utc_offset_minutes.abs() >= MINUTES_PER_DAY {
            return Err(anyhow!(
                "report.utc_offset_minutes must be within ±{} minutes, got {}",
                MINUTES_PER_DAY - 1,
                self.report.utc_offset_minutes
            ));
        }
        if self.report.period_days == Some(0) {
            return Err(anyhow!("report.period_days must be at least 1"));
        }
        Ok(())
    }
}

/// Split a list-id string on newlines and commas, dropping blanks.
pub fn parse_list_ids(raw: &str) -> Vec<String> {
    raw.split(['\n', ','])
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}
