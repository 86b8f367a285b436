//! Task classification and aggregation.
//!
//! Everything here is a pure function of its inputs: no I/O, no shared
//! state. Results are recomputed from the current task collection on every
//! call.

pub mod aggregate;
pub mod assignees;
pub mod classify;
pub mod priority;
pub mod report;
pub mod window;

pub use aggregate::{
    CategoryCounts, MemberRollup, PriorityCounts, Statistics, aggregate,
    rank_by_period_completions,
};
pub use assignees::{AssigneeEntry, AssigneeIndex, build_assignee_index};
pub use classify::{
    Category, CategoryPartition, ClassificationRule, classify, classify_all, classify_with_rule,
};
pub use priority::{PriorityLevel, normalize_priority};
pub use report::{ListReport, StatusUsage, TaskSummary, build_list_report, status_vocabulary};
pub use window::{ReportingPeriod, completion_ms, filter_by_window};
