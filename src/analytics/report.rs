//! Per-list report composition.
//!
//! A `ListReport` is the owned, serializable result of one aggregation pass
//! over a list: statistics, browsable task summaries per category, list
//! membership and the raw status vocabulary.

use super::aggregate::{Statistics, aggregate};
use super::assignees::build_assignee_index;
use super::classify::{Category, ClassificationRule, classify_with_rule};
use super::priority::{PriorityLevel, normalize_priority};
use super::window::ReportingPeriod;
use crate::types::{ListMetadata, MemberProfile, Task};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Compact task representation for browsing views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub id: String,
    pub name: String,
    pub status: String,
    pub category: Category,
    pub priority: PriorityLevel,
    pub assignees: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date_ms: Option<i64>,
}

impl TaskSummary {
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            name: task.display_name().to_string(),
            status: task.status.name.clone(),
            category: classify_with_rule(task).0,
            priority: normalize_priority(task.priority.as_ref()),
            assignees: task
                .assignees
                .iter()
                .map(|p| p.display_name().to_string())
                .collect(),
            url: task.url.clone(),
            due_date_ms: task.due_date.as_ref().and_then(|ts| ts.millis()),
        }
    }
}

/// How one raw (status name, status type) pair is classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUsage {
    pub name: String,
    pub kind: String,
    pub category: Category,
    pub rule: ClassificationRule,
    pub count: usize,
}

/// Distinct raw statuses with their classification, in first-seen order.
///
/// Tasks carrying `date_closed` are grouped separately from tasks with the
/// same status but no close date, since they classify differently.
pub fn status_vocabulary(tasks: &[Task]) -> Vec<StatusUsage> {
    let mut usages: Vec<StatusUsage> = Vec::new();
    let mut positions: HashMap<(String, String, ClassificationRule), usize> = HashMap::new();
    for task in tasks {
        let (category, rule) = classify_with_rule(task);
        let key = (task.status.name.clone(), task.status.kind.clone(), rule);
        match positions.get(&key) {
            Some(&i) => usages[i].count += 1,
            None => {
                positions.insert(key, usages.len());
                usages.push(StatusUsage {
                    name: task.status.name.clone(),
                    kind: task.status.kind.clone(),
                    category,
                    rule,
                    count: 1,
                });
            }
        }
    }
    usages
}

/// Everything the presentation layer shows for one list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListReport {
    pub list_id: String,
    pub list_name: String,
    /// List-level members, defaults applied.
    pub members: Vec<MemberProfile>,
    pub statistics: Statistics,
    pub tasks: BTreeMap<Category, Vec<TaskSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<ReportingPeriod>,
    /// Tasks completed in the period, in input order.
    pub period_tasks: Vec<TaskSummary>,
    pub statuses: Vec<StatusUsage>,
}

impl ListReport {
    pub fn tasks_in(&self, category: Category) -> &[TaskSummary] {
        self.tasks.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Run one aggregation pass over a list.
pub fn build_list_report(
    list: &ListMetadata,
    tasks: &[Task],
    period: Option<&ReportingPeriod>,
) -> ListReport {
    let index = build_assignee_index(tasks);
    let period_filtered = period.map(|p| p.filter(tasks));
    let statistics = aggregate(tasks, &index, period_filtered.as_deref());

    let mut by_category: BTreeMap<Category, Vec<TaskSummary>> =
        Category::ALL.iter().map(|c| (*c, Vec::new())).collect();
    for task in tasks {
        let summary = TaskSummary::from_task(task);
        by_category.entry(summary.category).or_default().push(summary);
    }

    ListReport {
        list_id: list.id.clone(),
        list_name: list.display_name(),
        members: list.members.iter().map(|p| p.profile()).collect(),
        statistics,
        tasks: by_category,
        period: period.copied(),
        period_tasks: period_filtered
            .unwrap_or_default()
            .into_iter()
            .map(TaskSummary::from_task)
            .collect(),
        statuses: status_vocabulary(tasks),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RawTimestamp, TaskStatus};

    fn task(id: &str, name: &str, kind: &str) -> Task {
        Task {
            id: id.to_string(),
            status: TaskStatus::new(name, kind),
            ..Default::default()
        }
    }

    #[test]
    fn test_status_vocabulary_groups_pairs() {
        let mut closed = task("3", "review", "custom");
        closed.date_closed = Some(RawTimestamp::new("1"));
        let tasks = vec![
            task("1", "review", "custom"),
            task("2", "review", "custom"),
            closed,
            task("4", "shipped", "done"),
        ];
        let vocab = status_vocabulary(&tasks);
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab[0].count, 2);
        assert_eq!(vocab[0].rule, ClassificationRule::Fallback);
        assert_eq!(vocab[1].category, Category::Closed);
        assert_eq!(vocab[2].category, Category::Completed);
    }

    #[test]
    fn test_report_buckets_every_category() {
        let list = ListMetadata {
            id: "L1".into(),
            ..Default::default()
        };
        let tasks = vec![task("1", "to do", "open")];
        let report = build_list_report(&list, &tasks, None);

        assert_eq!(report.list_name, "List L1");
        assert_eq!(report.tasks.len(), 4);
        assert_eq!(report.tasks_in(Category::ToDo).len(), 1);
        assert!(report.tasks_in(Category::Closed).is_empty());
        assert!(report.period.is_none());
        assert!(report.period_tasks.is_empty());
    }
}
