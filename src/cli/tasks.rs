//! Tasks subcommand: per-status browsing.

use crate::analytics::Category;
use crate::error::{InsightError, InsightResult};
use clap::Args;

/// Arguments for the tasks subcommand
#[derive(Args, Debug)]
pub struct TasksArgs {
    /// Category to show: to-do, in-progress, completed or closed
    #[arg(short = 'C', long, default_value = "to-do")]
    pub category: String,
}

impl TasksArgs {
    pub fn category(&self) -> InsightResult<Category> {
        Category::from_str(&self.category)
            .ok_or_else(|| InsightError::unknown_category(&self.category))
    }
}
