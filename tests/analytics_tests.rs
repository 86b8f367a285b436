//! Integration tests for classification and aggregation.
//!
//! Fixtures use the tracker's JSON payload shapes so decoding and
//! analytics are exercised together.

use chrono::NaiveDate;
use list_insights::analytics::{
    AssigneeIndex, Category, PriorityLevel, ReportingPeriod, aggregate, build_assignee_index,
    build_list_report, classify, classify_all, filter_by_window, normalize_priority,
};
use list_insights::types::{ListMetadata, Task};
use serde_json::{Value, json};

/// Helper to decode a list of tasks from JSON.
fn tasks(value: Value) -> Vec<Task> {
    serde_json::from_value(value).expect("Failed to decode task fixtures")
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Sorted task ids assigned to one person.
fn assigned_ids(index: &AssigneeIndex<'_>, person: &str) -> Vec<String> {
    let mut ids: Vec<_> = index
        .get(person)
        .unwrap()
        .tasks
        .iter()
        .map(|t| t.id.clone())
        .collect();
    ids.sort();
    ids
}

/// 2024-01-01T00:00:00Z in milliseconds.
const JAN_1_2024_MS: i64 = 1_704_067_200_000;

#[test]
fn five_task_scenario_partitions_as_expected() {
    let tasks = tasks(json!([
        {"id": "1", "status": {"status": "complete", "type": "done"}},
        {"id": "2", "status": {"status": "shipped", "type": "done"}},
        {"id": "3", "status": {"status": "In Progress", "type": "custom"},
         "date_closed": "1704067200000"},
        {"id": "4", "status": {"status": "To Do", "type": "custom"}},
        {"id": "5", "status": {"type": "open"}}
    ]));

    let partition = classify_all(&tasks);
    assert_eq!(partition.completed.len(), 2);
    assert_eq!(partition.closed.len(), 1);
    assert_eq!(partition.in_progress.len(), 0);
    assert_eq!(partition.to_do.len(), 2);
    assert_eq!(partition.closed[0].id, "3");
}

#[test]
fn closed_date_takes_precedence_over_active_type() {
    let tasks = tasks(json!([
        {"id": "x", "status": {"status": "doing", "type": "active"},
         "date_closed": 1704067200000i64}
    ]));
    assert_eq!(classify(&tasks[0]), Category::Closed);
}

#[test]
fn classification_is_total_over_messy_input() {
    let tasks = tasks(json!([
        {"id": 1},
        {"id": 2, "status": null},
        {"id": 3, "status": {"status": null, "type": null}},
        {"id": 4, "status": {"status": "Blocked", "type": "custom"}},
        {"id": 5, "status": {"status": "", "type": "closed"}},
        {"id": 6, "date_closed": ""},
        {"id": 7, "date_done": "1704067200000"}
    ]));
    let partition = classify_all(&tasks);
    assert_eq!(partition.total(), tasks.len());

    let index = build_assignee_index(&tasks);
    let stats = aggregate(&tasks, &index, None);
    assert_eq!(stats.counts.total(), tasks.len());
    // ids 1, 2, 3, 4, 6, 7 match no rule
    assert_eq!(stats.fallback_count, 6);
}

#[test]
fn priority_normalization_never_fails() {
    let inputs = [
        json!(null),
        json!(1),
        json!("2"),
        json!({"priority": 3}),
        json!({"id": "4", "priority": null}),
        json!({"id": "1", "priority": "urgent", "color": "#f50000"}),
        json!("garbage"),
        json!(-7),
        json!(3.5),
        json!([]),
    ];
    let levels: Vec<_> = inputs.iter().map(|v| normalize_priority(Some(v))).collect();
    assert_eq!(
        levels,
        vec![
            PriorityLevel::None,
            PriorityLevel::Urgent,
            PriorityLevel::High,
            PriorityLevel::Normal,
            PriorityLevel::Low,
            PriorityLevel::None,
            PriorityLevel::None,
            PriorityLevel::None,
            PriorityLevel::None,
            PriorityLevel::None,
        ]
    );
}

#[test]
fn completion_rate_boundaries() {
    let empty: Vec<Task> = Vec::new();
    let stats = aggregate(&empty, &build_assignee_index(&empty), None);
    assert_eq!(stats.completion_rate, 0.0);

    let one_closed = tasks(json!([{"id": "1", "date_closed": "1"}]));
    let stats = aggregate(&one_closed, &build_assignee_index(&one_closed), None);
    assert_eq!(stats.completion_rate, 1.0);
}

#[test]
fn window_edges_are_inclusive() {
    let start = JAN_1_2024_MS;
    let end = JAN_1_2024_MS + 2 * 86_400_000 + 86_399_999; // end of Jan 3
    let tasks = tasks(json!([
        {"id": "at-start", "date_closed": start.to_string()},
        {"id": "at-end", "date_done": end},
        {"id": "before", "date_closed": (start - 1).to_string()},
        {"id": "after", "date_closed": (end + 1).to_string()},
        {"id": "never"}
    ]));

    let ids: Vec<_> = filter_by_window(&tasks, day(2024, 1, 1), day(2024, 1, 3))
        .into_iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(ids, vec!["at-start", "at-end"]);
}

#[test]
fn assignee_fan_out_is_order_independent() {
    let forward = tasks(json!([
        {"id": "1", "assignees": [{"id": 10, "username": "ana"}, {"id": 20, "username": "ben"}]},
        {"id": "2", "assignees": [{"id": 20, "username": "ben"}]},
        {"id": "3", "assignees": []}
    ]));
    let mut reversed = forward.clone();
    reversed.reverse();

    let a = build_assignee_index(&forward);
    let b = build_assignee_index(&reversed);

    for person in ["10", "20"] {
        assert_eq!(assigned_ids(&a, person), assigned_ids(&b, person));
    }
    assert_eq!(a.get("20").unwrap().tasks.len(), 2);
    assert_eq!(a.len(), 2);
}

#[test]
fn workload_ranking_keeps_first_appearance_for_ties() {
    let done_at = JAN_1_2024_MS + 1_000;
    let tasks = tasks(json!([
        {"id": "1", "assignees": [{"id": "zed"}], "status": {"type": "open"}},
        {"id": "2", "assignees": [{"id": "amy"}], "date_closed": done_at.to_string()},
        {"id": "3", "assignees": [{"id": "zed"}], "date_closed": done_at.to_string()},
        {"id": "4", "assignees": [{"id": "kim"}], "date_closed": done_at.to_string()},
        {"id": "5", "assignees": [{"id": "kim"}], "date_done": done_at.to_string()}
    ]));

    let list = ListMetadata {
        id: "L".into(),
        ..Default::default()
    };
    let period = ReportingPeriod::new(day(2024, 1, 1), day(2024, 1, 1));
    let report = build_list_report(&list, &tasks, Some(&period));

    let ranked: Vec<_> = report
        .statistics
        .workload
        .iter()
        .map(|m| (m.profile.id.as_str(), m.period_completed))
        .collect();
    assert_eq!(ranked, vec![("kim", 2), ("zed", 1), ("amy", 1)]);
    assert_eq!(report.statistics.period_completed, Some(4));
    assert_eq!(report.period_tasks.len(), 4);
}

#[test]
fn repeated_aggregation_is_idempotent() {
    let tasks = tasks(json!([
        {"id": "1", "assignees": [{"id": 1}], "status": {"status": "in progress"}},
        {"id": "2", "assignees": [{"id": 2}], "date_closed": JAN_1_2024_MS.to_string(),
         "priority": 2}
    ]));
    let list = ListMetadata {
        id: "L".into(),
        name: Some("Ops".into()),
        ..Default::default()
    };
    let period = ReportingPeriod::new(day(2024, 1, 1), day(2024, 1, 7));

    let first = build_list_report(&list, &tasks, Some(&period));
    let second = build_list_report(&list, &tasks, Some(&period));
    assert_eq!(first, second);
    assert_eq!(first.statistics.priorities.high, 1);
    assert_eq!(first.tasks_in(Category::InProgress).len(), 1);
}

#[test]
fn inverted_period_yields_empty_set() {
    let tasks = tasks(json!([{"id": "1", "date_closed": (JAN_1_2024_MS + 1).to_string()}]));
    assert!(filter_by_window(&tasks, day(2024, 1, 2), day(2024, 1, 1)).is_empty());
}
