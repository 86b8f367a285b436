//! Aggregate and per-member statistics.

use super::assignees::AssigneeIndex;
use super::classify::{Category, ClassificationRule, classify_with_rule};
use super::priority::{PriorityLevel, normalize_priority};
use crate::types::{MemberProfile, Task};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Task counts per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub to_do: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub closed: usize,
}

impl CategoryCounts {
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut counts = Self::default();
        for task in tasks {
            counts.add(classify_with_rule(task).0);
        }
        counts
    }

    pub fn add(&mut self, category: Category) {
        match category {
            Category::ToDo => self.to_do += 1,
            Category::InProgress => self.in_progress += 1,
            Category::Completed => self.completed += 1,
            Category::Closed => self.closed += 1,
        }
    }

    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::ToDo => self.to_do,
            Category::InProgress => self.in_progress,
            Category::Completed => self.completed,
            Category::Closed => self.closed,
        }
    }

    pub fn total(&self) -> usize {
        self.to_do + self.in_progress + self.completed + self.closed
    }

    /// Tasks not yet finished.
    pub fn open(&self) -> usize {
        self.to_do + self.in_progress
    }

    pub fn finished(&self) -> usize {
        self.completed + self.closed
    }

    /// `(completed + closed) / total`, or 0.0 for an empty collection.
    pub fn completion_rate(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.finished() as f64 / total as f64,
        }
    }
}

/// Task counts per priority level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCounts {
    pub urgent: usize,
    pub high: usize,
    pub normal: usize,
    pub low: usize,
    pub none: usize,
}

impl PriorityCounts {
    pub fn add(&mut self, level: PriorityLevel) {
        match level {
            PriorityLevel::Urgent => self.urgent += 1,
            PriorityLevel::High => self.high += 1,
            PriorityLevel::Normal => self.normal += 1,
            PriorityLevel::Low => self.low += 1,
            PriorityLevel::None => self.none += 1,
        }
    }

    pub fn get(&self, level: PriorityLevel) -> usize {
        match level {
            PriorityLevel::Urgent => self.urgent,
            PriorityLevel::High => self.high,
            PriorityLevel::Normal => self.normal,
            PriorityLevel::Low => self.low,
            PriorityLevel::None => self.none,
        }
    }
}

/// Statistics for one member's tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRollup {
    pub profile: MemberProfile,
    pub total: usize,
    pub counts: CategoryCounts,
    pub completion_rate: f64,
    /// Member tasks that were completed inside the reporting period.
    pub period_completed: usize,
}

/// Statistics for one task collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total: usize,
    pub counts: CategoryCounts,
    pub open: usize,
    pub completion_rate: f64,
    pub priorities: PriorityCounts,
    /// Tasks whose status matched no rule and defaulted to to-do.
    pub fallback_count: usize,
    /// Tasks completed in the reporting period, when one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_completed: Option<usize>,
    /// Per-member rollups in assignee-index order.
    pub members: Vec<MemberRollup>,
    /// Members ranked by period completions, descending.
    pub workload: Vec<MemberRollup>,
}

/// Combine a task collection, its assignee index and the period-filtered
/// subset into statistics.
///
/// Period membership is decided by task id.
pub fn aggregate(
    tasks: &[Task],
    index: &AssigneeIndex<'_>,
    period_filtered: Option<&[&Task]>,
) -> Statistics {
    let mut counts = CategoryCounts::default();
    let mut priorities = PriorityCounts::default();
    let mut fallback_count = 0;
    for task in tasks {
        let (category, rule) = classify_with_rule(task);
        counts.add(category);
        if rule == ClassificationRule::Fallback {
            fallback_count += 1;
        }
        priorities.add(normalize_priority(task.priority.as_ref()));
    }

    let in_period: HashSet<&str> = period_filtered
        .unwrap_or_default()
        .iter()
        .map(|t| t.id.as_str())
        .collect();

    let members: Vec<MemberRollup> = index
        .iter()
        .map(|entry| {
            let member_counts = CategoryCounts::from_tasks(entry.tasks.iter().copied());
            let period_completed = entry
                .tasks
                .iter()
                .filter(|t| in_period.contains(t.id.as_str()))
                .count();
            MemberRollup {
                profile: entry.profile.clone(),
                total: entry.tasks.len(),
                counts: member_counts,
                completion_rate: member_counts.completion_rate(),
                period_completed,
            }
        })
        .collect();

    let workload = rank_by_period_completions(&members);

    Statistics {
        total: tasks.len(),
        counts,
        open: counts.open(),
        completion_rate: counts.completion_rate(),
        priorities,
        fallback_count,
        period_completed: period_filtered.map(|filtered| filtered.len()),
        members,
        workload,
    }
}

/// Rank members by period completions. Ties keep their input order.
pub fn rank_by_period_completions(members: &[MemberRollup]) -> Vec<MemberRollup> {
    let mut ranked = members.to_vec();
    ranked.sort_by(|a, b| b.period_completed.cmp(&a.period_completed));
    ranked
}
