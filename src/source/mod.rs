//! Task sources: where list metadata and tasks come from.
//!
//! A source hands the analytics core complete, deduplicated task
//! collections. Failures are logged here and surface to callers only as
//! absent metadata or an empty task list.

mod memory;
mod snapshot;

pub use memory::MemorySource;
pub use snapshot::{ListSnapshot, SnapshotSource, TaskPage};

use crate::types::{ListMetadata, Task};
use async_trait::async_trait;
use std::collections::HashSet;

/// Supplier of list metadata and tasks.
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// Metadata for a list, or `None` when it cannot be obtained.
    async fn get_list_info(&self, list_id: &str) -> Option<ListMetadata>;

    /// All tasks of a list, deduplicated by id. Empty on failure.
    async fn get_tasks(&self, list_id: &str) -> Vec<Task>;

    /// Metadata and tasks together. Sources that read both from one place
    /// override this to avoid a second read.
    async fn fetch_list(&self, list_id: &str) -> (Option<ListMetadata>, Vec<Task>) {
        let info = self.get_list_info(list_id).await;
        let tasks = self.get_tasks(list_id).await;
        (info, tasks)
    }
}

/// Drop repeated task ids, keeping the first occurrence.
pub fn dedupe_tasks(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen: HashSet<String> = HashSet::with_capacity(tasks.len());
    tasks
        .into_iter()
        .filter(|task| seen.insert(task.id.clone()))
        .collect()
}
