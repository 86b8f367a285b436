//! Core types for list analytics.
//!
//! These mirror the task and list payloads of the tracker API, but every
//! field is tolerant: ids may arrive as strings or numbers, timestamps as
//! strings or numbers, and any field may be null or missing.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Placeholder shown for tasks without a name.
pub const DEFAULT_TASK_NAME: &str = "Untitled task";
/// Placeholder shown for people without a username.
pub const DEFAULT_USERNAME: &str = "Unknown";
/// Placeholder shown for people without an email.
pub const DEFAULT_EMAIL: &str = "N/A";
/// Decorative color for people without one.
pub const DEFAULT_COLOR: &str = "#7b68ee";

/// A millisecond-epoch timestamp as delivered by the tracker.
///
/// The raw text is kept so that "present but unparseable" stays distinct
/// from "absent".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RawTimestamp(String);

impl RawTimestamp {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse to integer milliseconds. Integral floats are accepted.
    pub fn millis(&self) -> Option<i64> {
        let s = self.0.trim();
        if let Ok(ms) = s.parse::<i64>() {
            return Some(ms);
        }
        match s.parse::<f64>() {
            Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Some(f as i64)
            }
            _ => None,
        }
    }
}

/// A person as it appears in task assignees or list members.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub color: Option<String>,
}

impl Person {
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or(DEFAULT_USERNAME)
    }

    pub fn display_email(&self) -> &str {
        self.email.as_deref().unwrap_or(DEFAULT_EMAIL)
    }

    pub fn display_color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_COLOR)
    }

    /// Profile with every display default substituted.
    pub fn profile(&self) -> MemberProfile {
        MemberProfile {
            id: self.id.clone(),
            username: self.display_name().to_string(),
            email: self.display_email().to_string(),
            color: self.display_color().to_string(),
        }
    }
}

/// A person with all display defaults applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub color: String,
}

/// Status of a task: free-text name plus the tracker's coarse type.
///
/// Decodes from the tracker's `{"status": .., "type": ..}` object, from an
/// object that names the status under `name`, or from a bare string. Any
/// other shape, or a non-string member, decodes to empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskStatus {
    #[serde(rename = "status")]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl TaskStatus {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(name) => Self::new(name.as_str(), ""),
            Value::Object(map) => {
                let text = |key: &str| map.get(key).and_then(Value::as_str);
                Self::new(
                    text("status").or_else(|| text("name")).unwrap_or_default(),
                    text("type").unwrap_or_default(),
                )
            }
            _ => Self::default(),
        }
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self::from_value(&Value::deserialize(deserializer)?))
    }
}

/// A task record as fetched from the tracker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    /// Raw priority value; see `analytics::normalize_priority`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Value>,
    #[serde(default, deserialize_with = "lenient_people")]
    pub assignees: Vec<Person>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub date_created: Option<RawTimestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub due_date: Option<RawTimestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub date_closed: Option<RawTimestamp>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub date_done: Option<RawTimestamp>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
}

impl Task {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_TASK_NAME)
    }
}

/// List metadata as fetched from the tracker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListMetadata {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    /// List-level membership, independent of who is assigned to tasks.
    #[serde(default, deserialize_with = "lenient_people")]
    pub members: Vec<Person>,
}

impl ListMetadata {
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("List {}", self.id),
        }
    }
}

// ---------------------------------------------------------------------------
// Lenient field decoding
// ---------------------------------------------------------------------------

/// Keep the object entries of a people array; anything else is dropped.
fn lenient_people<'de, D>(deserializer: D) -> Result<Vec<Person>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(entries) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(entries
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}

fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<RawTimestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Some(RawTimestamp(s)),
        Value::Number(n) => Some(RawTimestamp(n.to_string())),
        _ => None,
    })
}
