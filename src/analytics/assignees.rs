//! Per-person grouping of tasks.

use crate::types::{MemberProfile, Task};
use std::collections::HashMap;

/// One person and the tasks assigned to them.
#[derive(Debug, Clone)]
pub struct AssigneeEntry<'a> {
    pub profile: MemberProfile,
    pub tasks: Vec<&'a Task>,
}

/// Person id -> profile and tasks, iterated in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct AssigneeIndex<'a> {
    entries: Vec<AssigneeEntry<'a>>,
    positions: HashMap<String, usize>,
}

impl<'a> AssigneeIndex<'a> {
    pub fn get(&self, person_id: &str) -> Option<&AssigneeEntry<'a>> {
        self.positions.get(person_id).map(|&i| &self.entries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssigneeEntry<'a>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Group tasks by assignee.
///
/// A task with several assignees is listed under each of them. Tasks
/// without assignees are left out.
pub fn build_assignee_index(tasks: &[Task]) -> AssigneeIndex<'_> {
    let mut index = AssigneeIndex::default();
    for task in tasks {
        let mut seen_on_task: Vec<&str> = Vec::with_capacity(task.assignees.len());
        for person in &task.assignees {
            if seen_on_task.contains(&person.id.as_str()) {
                continue;
            }
            seen_on_task.push(&person.id);

            let position = match index.positions.get(&person.id) {
                Some(&i) => i,
                None => {
                    index.entries.push(AssigneeEntry {
                        profile: person.profile(),
                        tasks: Vec::new(),
                    });
                    let i = index.entries.len() - 1;
                    index.positions.insert(person.id.clone(), i);
                    i
                }
            };
            index.entries[position].tasks.push(task);
        }
    }
    tracing::trace!(members = index.len(), "Built assignee index");
    index
}
