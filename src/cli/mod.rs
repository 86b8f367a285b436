//! CLI command definitions for list-insights
//!
//! The main entry point is the `Cli` struct; each subcommand selects one
//! view over the same aggregated dashboard.

pub mod period;
pub mod tasks;

use clap::{Parser, Subcommand};
use tasks::TasksArgs;

/// Task-list analytics: status breakdowns, member workload and period completions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory of list snapshots (overrides config)
    #[arg(short, long, global = true)]
    pub snapshot_dir: Option<String>,

    /// List id to report on; repeat for several lists (overrides config)
    #[arg(short = 'L', long = "list", value_name = "ID", global = true)]
    pub lists: Vec<String>,

    /// Output format: markdown or json (overrides config)
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// First day of the reporting period (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", global = true)]
    pub from: Option<String>,

    /// Last day of the reporting period (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", global = true)]
    pub to: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Per-list statistics (default if no subcommand given)
    Overview,

    /// Browse the tasks of one status category
    Tasks(TasksArgs),

    /// List members and per-assignee breakdown
    Members,

    /// Completions in the reporting period and the workload ranking
    Period,

    /// Raw status vocabulary and how each status is classified
    Statuses,
}
