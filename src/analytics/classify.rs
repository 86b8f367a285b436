//! Status classification.
//!
//! Rules are evaluated in a fixed order and the first match wins. The
//! predicates overlap (a task may carry `date_closed` and an "active"
//! status at once), so the order is the tie-break.

use crate::types::Task;
use serde::{Deserialize, Serialize};

/// The four mutually exclusive task categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ToDo,
    InProgress,
    Completed,
    Closed,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::ToDo,
        Category::InProgress,
        Category::Completed,
        Category::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ToDo => "to_do",
            Category::InProgress => "in_progress",
            Category::Completed => "completed",
            Category::Closed => "closed",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::ToDo => "To Do",
            Category::InProgress => "In Progress",
            Category::Completed => "Completed",
            Category::Closed => "Closed",
        }
    }

    /// Accepts `to_do`, `to-do`, `todo` and friends.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "to_do" | "todo" => Some(Category::ToDo),
            "in_progress" | "inprogress" => Some(Category::InProgress),
            "completed" | "done" => Some(Category::Completed),
            "closed" => Some(Category::Closed),
            _ => None,
        }
    }
}

/// Which classification rule produced a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationRule {
    ClosedDate,
    DoneType,
    ActiveStatus,
    OpenStatus,
    Fallback,
}

/// Classify a task, reporting the rule that matched.
pub fn classify_with_rule(task: &Task) -> (Category, ClassificationRule) {
    let name = task.status.name.to_lowercase();
    let kind = task.status.kind.to_lowercase();

    if task.date_closed.is_some() {
        return (Category::Closed, ClassificationRule::ClosedDate);
    }
    if kind == "done" || kind == "closed" {
        return (Category::Completed, ClassificationRule::DoneType);
    }
    if name.contains("progress") || name.contains("active") || kind == "active" {
        return (Category::InProgress, ClassificationRule::ActiveStatus);
    }
    if kind.contains("open") || name.trim() == "to do" {
        return (Category::ToDo, ClassificationRule::OpenStatus);
    }
    (Category::ToDo, ClassificationRule::Fallback)
}

/// Classify a task into exactly one category.
pub fn classify(task: &Task) -> Category {
    classify_with_rule(task).0
}

/// Tasks partitioned by category, input order preserved in each bucket.
#[derive(Debug, Clone, Default)]
pub struct CategoryPartition<'a> {
    pub to_do: Vec<&'a Task>,
    pub in_progress: Vec<&'a Task>,
    pub completed: Vec<&'a Task>,
    pub closed: Vec<&'a Task>,
}

impl<'a> CategoryPartition<'a> {
    pub fn get(&self, category: Category) -> &[&'a Task] {
        match category {
            Category::ToDo => &self.to_do,
            Category::InProgress => &self.in_progress,
            Category::Completed => &self.completed,
            Category::Closed => &self.closed,
        }
    }

    pub fn total(&self) -> usize {
        self.to_do.len() + self.in_progress.len() + self.completed.len() + self.closed.len()
    }
}

/// Partition a task collection into the four categories.
pub fn classify_all(tasks: &[Task]) -> CategoryPartition<'_> {
    let mut partition = CategoryPartition::default();
    for task in tasks {
        let bucket = match classify(task) {
            Category::ToDo => &mut partition.to_do,
            Category::InProgress => &mut partition.in_progress,
            Category::Completed => &mut partition.completed,
            Category::Closed => &mut partition.closed,
        };
        bucket.push(task);
    }
    partition
}
