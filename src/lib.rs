//! List Insights Library
//!
//! Classification and aggregation of task-tracker lists, plus the sources,
//! configuration and formatting used by the CLI.

pub mod analytics;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod logging;
pub mod source;
pub mod types;
