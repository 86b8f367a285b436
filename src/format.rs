//! Output formatting for markdown and JSON.

use crate::analytics::{
    Category, ListReport, MemberRollup, PriorityLevel, ReportingPeriod, StatusUsage, TaskSummary,
};
use crate::dashboard::{Dashboard, ListOutcome};
use chrono::DateTime;
use serde::Serialize;

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            _ => None,
        }
    }
}

/// Serialize any report value as pretty JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Format a rate in `[0, 1]` as a percentage.
pub fn format_rate(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

fn format_period(period: &ReportingPeriod) -> String {
    format!("{} to {}", period.start, period.end)
}

fn format_date_ms(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| ms.to_string())
}

fn unavailable_markdown(list_id: &str) -> String {
    format!("## List {}\n\n_Could not fetch data for this list._\n\n", list_id)
}

/// Render each available list with `render`, and a notice for the rest.
fn render_lists(dashboard: &Dashboard, render: impl Fn(&ListReport) -> String) -> String {
    let mut md = String::new();
    for outcome in &dashboard.lists {
        match outcome {
            ListOutcome::Report(report) => md.push_str(&render(report)),
            ListOutcome::Unavailable { list_id } => md.push_str(&unavailable_markdown(list_id)),
        }
    }
    md
}

/// Overview metrics for every list.
pub fn format_overview_markdown(dashboard: &Dashboard) -> String {
    let mut md = format!("# List Statistics ({})\n\n", dashboard.lists.len());
    if let Some(ref period) = dashboard.period {
        md.push_str(&format!("Reporting period: {}\n\n", format_period(period)));
    }
    md.push_str(&render_lists(dashboard, format_list_overview));
    md
}

fn format_list_overview(report: &ListReport) -> String {
    let stats = &report.statistics;
    let mut md = String::new();
    md.push_str(&format!("## {}\n", report.list_name));
    md.push_str(&format!("- **id**: `{}`\n", report.list_id));
    md.push_str(&format!("- **total**: {}\n", stats.total));
    md.push_str(&format!("- **open**: {}\n", stats.open));
    for category in Category::ALL {
        md.push_str(&format!(
            "- **{}**: {}\n",
            category.label().to_lowercase(),
            stats.counts.get(category)
        ));
    }
    md.push_str(&format!(
        "- **completion rate**: {}\n",
        format_rate(stats.completion_rate)
    ));
    if let Some(done) = stats.period_completed {
        md.push_str(&format!("- **completed in period**: {}\n", done));
    }

    let priorities: Vec<String> = PriorityLevel::ALL
        .iter()
        .map(|level| format!("{} {}", level.as_str(), stats.priorities.get(*level)))
        .collect();
    md.push_str(&format!("- **priorities**: {}\n", priorities.join(", ")));

    if stats.fallback_count > 0 {
        md.push_str(&format!(
            "- **unrecognized statuses**: {} (counted as to do)\n",
            stats.fallback_count
        ));
    }
    md.push('\n');
    md
}

/// Tasks of one category for every list.
pub fn format_tasks_markdown(dashboard: &Dashboard, category: Category) -> String {
    render_lists(dashboard, |report| {
        let tasks = report.tasks_in(category);
        let mut md = format!(
            "## {}: {} ({})\n\n",
            report.list_name,
            category.label(),
            tasks.len()
        );
        if tasks.is_empty() {
            md.push_str(&format!("_No {} tasks._\n", category.label().to_lowercase()));
        }
        for task in tasks {
            md.push_str(&format_task_line(task));
        }
        md.push('\n');
        md
    })
}

fn format_task_line(task: &TaskSummary) -> String {
    let title = match task.url {
        Some(ref url) => format!("[{}]({})", task.name, url),
        None => task.name.clone(),
    };
    let priority_marker = match task.priority {
        PriorityLevel::Urgent => "!!! ",
        PriorityLevel::High => "!! ",
        _ => "",
    };
    let assignees = if task.assignees.is_empty() {
        "Unassigned".to_string()
    } else {
        task.assignees.join(", ")
    };
    let due = task
        .due_date_ms
        .map(|ms| format!(", due {}", format_date_ms(ms)))
        .unwrap_or_default();
    format!(
        "- {}{} _(status: **{}**, priority: {}, assignee: {}{})_\n",
        priority_marker,
        title,
        task.status,
        task.priority.as_str(),
        assignees,
        due,
    )
}

/// List members and the per-assignee breakdown.
pub fn format_members_markdown(dashboard: &Dashboard) -> String {
    render_lists(dashboard, |report| {
        let mut md = format!(
            "## {}\n\n### List Members ({})\n\n",
            report.list_name,
            report.members.len()
        );
        if report.members.is_empty() {
            md.push_str("_No members found for this list._\n");
        }
        for member in &report.members {
            md.push_str(&format!("- **{}** (`{}`)\n", member.username, member.email));
        }

        let members = &report.statistics.members;
        md.push_str(&format!("\n### Assignees ({})\n\n", members.len()));
        if members.is_empty() {
            md.push_str("_No assigned tasks._\n");
        } else {
            md.push_str("| Member | Total | To Do | In Progress | Completed | Closed | Rate |\n");
            md.push_str("|---|---|---|---|---|---|---|\n");
            for member in members {
                md.push_str(&format_member_row(member));
            }
        }
        md.push('\n');
        md
    })
}

fn format_member_row(member: &MemberRollup) -> String {
    format!(
        "| {} | {} | {} | {} | {} | {} | {} |\n",
        member.profile.username,
        member.total,
        member.counts.to_do,
        member.counts.in_progress,
        member.counts.completed,
        member.counts.closed,
        format_rate(member.completion_rate),
    )
}

/// Period completions and the ranked workload table.
pub fn format_period_markdown(dashboard: &Dashboard, top_members: Option<usize>) -> String {
    let mut md = String::new();
    match dashboard.period {
        Some(ref period) => {
            md.push_str(&format!("# Completed {}\n\n", format_period(period)));
            if period.is_inverted() {
                md.push_str("_Start date is after end date; nothing can match._\n\n");
            }
        }
        None => md.push_str("# Completed (no reporting period)\n\n"),
    }
    md.push_str(&render_lists(dashboard, |report| {
        let mut md = format!(
            "## {} ({} completed)\n\n",
            report.list_name,
            report.period_tasks.len()
        );
        for task in &report.period_tasks {
            md.push_str(&format_task_line(task));
        }

        let workload = &report.statistics.workload;
        let shown = top_members.unwrap_or(workload.len()).min(workload.len());
        if shown > 0 {
            md.push_str("\n| Rank | Member | Completed in period | Open | Total |\n");
            md.push_str("|---|---|---|---|---|\n");
            for (rank, member) in workload.iter().take(shown).enumerate() {
                md.push_str(&format!(
                    "| {} | {} | {} | {} | {} |\n",
                    rank + 1,
                    member.profile.username,
                    member.period_completed,
                    member.counts.open(),
                    member.total,
                ));
            }
        }
        md.push('\n');
        md
    }));
    md
}

/// Raw status vocabulary and how each status is classified.
pub fn format_statuses_markdown(dashboard: &Dashboard) -> String {
    render_lists(dashboard, |report| {
        let mut md = format!("## {}: Statuses ({})\n\n", report.list_name, report.statuses.len());
        if !report.statuses.is_empty() {
            md.push_str("| Status | Type | Category | Rule | Tasks |\n");
            md.push_str("|---|---|---|---|---|\n");
            for usage in &report.statuses {
                md.push_str(&format_status_row(usage));
            }
        }
        md.push('\n');
        md
    })
}

fn format_status_row(usage: &StatusUsage) -> String {
    let rule = serde_json::to_value(usage.rule)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();
    format!(
        "| {} | {} | {} | {} | {} |\n",
        usage.name,
        usage.kind,
        usage.category.label(),
        rule,
        usage.count
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::build_list_report;
    use crate::types::{ListMetadata, Task, TaskStatus};

    fn dashboard(tasks: Vec<Task>) -> Dashboard {
        let list = ListMetadata {
            id: "L1".into(),
            name: Some("Launch".into()),
            ..Default::default()
        };
        Dashboard {
            generated_at: "2024-01-01T00:00:00Z".into(),
            period: None,
            lists: vec![
                ListOutcome::Report(Box::new(build_list_report(&list, &tasks, None))),
                ListOutcome::Unavailable {
                    list_id: "L2".into(),
                },
            ],
        }
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("md"), Some(OutputFormat::Markdown));
        assert_eq!(OutputFormat::from_str("yaml"), None);
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(0.0), "0.0%");
        assert_eq!(format_rate(2.0 / 3.0), "66.7%");
    }

    #[test]
    fn test_overview_lists_unavailable() {
        let md = format_overview_markdown(&dashboard(vec![]));
        assert!(md.contains("## Launch"));
        assert!(md.contains("- **completion rate**: 0.0%"));
        assert!(md.contains("Could not fetch data"));
    }

    #[test]
    fn test_task_lines_show_unassigned_and_link() {
        let task = Task {
            id: "t1".into(),
            name: Some("Ship".into()),
            url: Some("https://example.com/t1".into()),
            status: TaskStatus::new("to do", "open"),
            ..Default::default()
        };
        let md = format_tasks_markdown(&dashboard(vec![task]), Category::ToDo);
        assert!(md.contains("[Ship](https://example.com/t1)"));
        assert!(md.contains("assignee: Unassigned"));
    }

    #[test]
    fn test_status_rule_names() {
        let task = Task {
            id: "t1".into(),
            status: TaskStatus::new("parked", "custom"),
            ..Default::default()
        };
        let md = format_statuses_markdown(&dashboard(vec![task]));
        assert!(md.contains("| parked | custom | To Do | fallback | 1 |"));
    }
}
