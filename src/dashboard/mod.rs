//! Dashboard driver.
//!
//! Fetches every tracked list from a [`TaskSource`], runs one aggregation
//! pass per list and collects the results in the configured list order.
//! Lists are processed concurrently; each touches only its own data.

use crate::analytics::{ListReport, ReportingPeriod, build_list_report};
use crate::source::TaskSource;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Result for one tracked list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ListOutcome {
    Report(Box<ListReport>),
    /// The source could not provide metadata for the list.
    Unavailable { list_id: String },
}

impl ListOutcome {
    pub fn list_id(&self) -> &str {
        match self {
            ListOutcome::Report(report) => &report.list_id,
            ListOutcome::Unavailable { list_id } => list_id,
        }
    }

    pub fn report(&self) -> Option<&ListReport> {
        match self {
            ListOutcome::Report(report) => Some(report),
            ListOutcome::Unavailable { .. } => None,
        }
    }
}

/// All tracked lists for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<ReportingPeriod>,
    pub lists: Vec<ListOutcome>,
}

impl Dashboard {
    pub fn reports(&self) -> impl Iterator<Item = &ListReport> {
        self.lists.iter().filter_map(ListOutcome::report)
    }
}

/// Fetch and aggregate one list.
pub async fn build_list_outcome(
    source: &dyn TaskSource,
    list_id: &str,
    period: Option<&ReportingPeriod>,
) -> ListOutcome {
    let (info, tasks) = source.fetch_list(list_id).await;
    match info {
        Some(list) => {
            let report = build_list_report(&list, &tasks, period);
            debug!(
                list_id = %list_id,
                total = report.statistics.total,
                fallback = report.statistics.fallback_count,
                "Aggregated list"
            );
            ListOutcome::Report(Box::new(report))
        }
        None => {
            warn!(list_id = %list_id, "Could not fetch data for list");
            ListOutcome::Unavailable {
                list_id: list_id.to_string(),
            }
        }
    }
}

/// Build the dashboard for a set of lists.
pub async fn build_dashboard(
    source: Arc<dyn TaskSource>,
    list_ids: &[String],
    period: Option<ReportingPeriod>,
) -> Dashboard {
    let mut set = JoinSet::new();
    for (position, list_id) in list_ids.iter().enumerate() {
        let source = Arc::clone(&source);
        let list_id = list_id.clone();
        set.spawn(async move {
            let outcome = build_list_outcome(source.as_ref(), &list_id, period.as_ref()).await;
            (position, outcome)
        });
    }

    let mut slots: Vec<Option<ListOutcome>> = vec![None; list_ids.len()];
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((position, outcome)) => slots[position] = Some(outcome),
            Err(e) => warn!("List aggregation task failed: {}", e),
        }
    }

    let lists: Vec<ListOutcome> = slots
        .into_iter()
        .zip(list_ids)
        .map(|(slot, list_id)| {
            slot.unwrap_or_else(|| ListOutcome::Unavailable {
                list_id: list_id.clone(),
            })
        })
        .collect();

    info!(
        lists = lists.len(),
        available = lists.iter().filter(|l| l.report().is_some()).count(),
        "Dashboard built"
    );

    Dashboard {
        generated_at: chrono::Utc::now().to_rfc3339(),
        period,
        lists,
    }
}
