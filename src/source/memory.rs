//! In-memory source for tests and embedding callers.

use super::{TaskSource, dedupe_tasks};
use crate::types::{ListMetadata, Task};
use async_trait::async_trait;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    lists: HashMap<String, ListMetadata>,
    tasks: HashMap<String, Vec<Task>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a list and its tasks.
    pub fn with_list(mut self, list: ListMetadata, tasks: Vec<Task>) -> Self {
        self.tasks.insert(list.id.clone(), tasks);
        self.lists.insert(list.id.clone(), list);
        self
    }

    /// Register tasks for a list whose metadata is unavailable.
    pub fn with_orphan_tasks(mut self, list_id: impl Into<String>, tasks: Vec<Task>) -> Self {
        self.tasks.insert(list_id.into(), tasks);
        self
    }
}

#[async_trait]
impl TaskSource for MemorySource {
    async fn get_list_info(&self, list_id: &str) -> Option<ListMetadata> {
        self.lists.get(list_id).cloned()
    }

    async fn get_tasks(&self, list_id: &str) -> Vec<Task> {
        self.tasks
            .get(list_id)
            .cloned()
            .map(dedupe_tasks)
            .unwrap_or_default()
    }
}
