//! Snapshot directory source.
//!
//! Reads previously fetched API responses, one file per list:
//! `<list_id>.json` or `<list_id>.json.gz`. A snapshot holds the list
//! payload and either a flat `tasks` array or the raw `pages` as returned
//! by the paginated task endpoint.

use super::{TaskSource, dedupe_tasks};
use crate::error::{InsightError, InsightResult};
use crate::types::{ListMetadata, Task};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One page of the paginated task endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPage {
    #[serde(default, deserialize_with = "lenient_tasks")]
    pub tasks: Vec<Task>,
}

/// Contents of one snapshot file.
///
/// A malformed record costs only itself: an undecodable task is skipped,
/// a non-object page reads as empty and a non-object `list` as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListSnapshot {
    #[serde(default, deserialize_with = "lenient_list")]
    pub list: Option<ListMetadata>,
    #[serde(default, deserialize_with = "lenient_tasks")]
    pub tasks: Vec<Task>,
    #[serde(default, deserialize_with = "lenient_pages")]
    pub pages: Vec<TaskPage>,
}

fn lenient_tasks<'de, D>(deserializer: D) -> Result<Vec<Task>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(entries) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(position, entry)| {
            serde_json::from_value::<Task>(entry)
                .inspect_err(|e| warn!(position, error = %e, "Skipping undecodable task"))
                .ok()
        })
        .collect())
}

fn lenient_pages<'de, D>(deserializer: D) -> Result<Vec<TaskPage>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(entries) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(entries
        .into_iter()
        .map(|entry| serde_json::from_value(entry).unwrap_or_default())
        .collect())
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Option<ListMetadata>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value)
        .inspect_err(|e| warn!(error = %e, "Ignoring undecodable list metadata"))
        .ok())
}

impl ListSnapshot {
    /// Load a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a snapshot from a file (plain JSON or gzip).
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        use std::fs::File;
        use std::io::{BufReader, Read};

        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        // Check for gzip magic bytes
        let mut magic = [0u8; 2];
        let is_gzip = reader.read_exact(&mut magic).is_ok() && magic == [0x1f, 0x8b];

        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let snapshot = if is_gzip {
            let decoder = flate2::read::GzDecoder::new(reader);
            serde_json::from_reader(decoder)?
        } else {
            serde_json::from_reader(reader)?
        };
        Ok(snapshot)
    }

    /// All tasks: the flat array followed by the pages, stopping at the
    /// first empty page, deduplicated by id.
    pub fn into_tasks(self) -> Vec<Task> {
        let mut tasks = self.tasks;
        for page in self.pages {
            if page.tasks.is_empty() {
                break;
            }
            tasks.extend(page.tasks);
        }
        dedupe_tasks(tasks)
    }
}

/// Source backed by a directory of snapshot files.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    dir: PathBuf,
}

impl SnapshotSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Locate the snapshot file for a list.
    pub fn snapshot_path(&self, list_id: &str) -> InsightResult<PathBuf> {
        if list_id.is_empty()
            || list_id.contains(['/', '\\'])
            || list_id.starts_with('.')
        {
            return Err(InsightError::invalid_value(
                "list_id",
                &format!("Not a usable list id: {:?}", list_id),
            ));
        }
        for name in [format!("{}.json", list_id), format!("{}.json.gz", list_id)] {
            let path = self.dir.join(name);
            if path.is_file() {
                return Ok(path);
            }
        }
        Err(InsightError::snapshot_not_found(list_id))
    }

    /// Read and parse the snapshot for a list.
    pub async fn load(&self, list_id: &str) -> InsightResult<ListSnapshot> {
        let path = self.snapshot_path(list_id)?;
        debug!(list_id = %list_id, path = %path.display(), "Reading snapshot");
        let id = list_id.to_string();
        tokio::task::spawn_blocking(move || ListSnapshot::from_file(&path))
            .await
            .map_err(InsightError::internal)?
            .map_err(|e| InsightError::snapshot_unreadable(&id, e))
    }

    async fn load_or_warn(&self, list_id: &str) -> Option<ListSnapshot> {
        match self.load(list_id).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(
                    list_id = %list_id,
                    code = ?e.code,
                    details = e.details.as_deref().unwrap_or(""),
                    "{}",
                    e
                );
                None
            }
        }
    }
}

#[async_trait]
impl TaskSource for SnapshotSource {
    async fn get_list_info(&self, list_id: &str) -> Option<ListMetadata> {
        self.fetch_list(list_id).await.0
    }

    async fn get_tasks(&self, list_id: &str) -> Vec<Task> {
        self.fetch_list(list_id).await.1
    }

    async fn fetch_list(&self, list_id: &str) -> (Option<ListMetadata>, Vec<Task>) {
        let Some(mut snapshot) = self.load_or_warn(list_id).await else {
            return (None, Vec::new());
        };
        let list = snapshot.list.take().map(|mut list| {
            if list.id.is_empty() {
                list.id = list_id.to_string();
            }
            list
        });
        if list.is_none() {
            warn!(list_id = %list_id, "Snapshot has no list metadata");
        }
        let tasks = snapshot.into_tasks();
        debug!(list_id = %list_id, tasks = tasks.len(), "Loaded snapshot");
        (list, tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pages_stop_at_first_empty_page() {
        let snapshot: ListSnapshot = serde_json::from_value(json!({
            "list": {"id": "1", "name": "Sprint"},
            "pages": [
                {"tasks": [{"id": "a"}, {"id": "b"}]},
                {"tasks": [{"id": "b"}, {"id": "c"}]},
                {"tasks": []},
                {"tasks": [{"id": "d"}]}
            ]
        }))
        .unwrap();
        let ids: Vec<_> = snapshot.into_tasks().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_flat_tasks_come_before_pages() {
        let snapshot = ListSnapshot::from_json(
            r#"{"tasks": [{"id": "x"}], "pages": [{"tasks": [{"id": "y"}, {"id": "x"}]}]}"#,
        )
        .unwrap();
        assert!(snapshot.list.is_none());
        let ids: Vec<_> = snapshot.into_tasks().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["x", "y"]);
    }

    #[test]
    fn test_bad_records_do_not_sink_the_snapshot() {
        let snapshot = ListSnapshot::from_json(
            r#"{
                "list": {"id": 3, "members": [null]},
                "tasks": [{"id": "a"}, null, "b", {"id": "c", "status": "in progress"}],
                "pages": [{"tasks": {"id": "x"}}, {"tasks": [{"id": "d"}]}]
            }"#,
        )
        .unwrap();
        assert_eq!(snapshot.list.as_ref().map(|l| l.id.as_str()), Some("3"));
        // the first page decodes as empty, so paging stops there
        let ids: Vec<_> = snapshot.into_tasks().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["a", "c"]);

        let snapshot = ListSnapshot::from_json(r#"{"list": "L", "pages": [7]}"#).unwrap();
        assert!(snapshot.list.is_none());
        assert!(snapshot.into_tasks().is_empty());
    }

    #[test]
    fn test_rejects_path_like_ids() {
        let source = SnapshotSource::new("snapshots");
        assert!(source.snapshot_path("../secret").is_err());
        assert!(source.snapshot_path("a/b").is_err());
        assert!(source.snapshot_path("").is_err());
    }
}
