//! Priority normalization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityLevel {
    Urgent,
    High,
    Normal,
    Low,
    None,
}

impl PriorityLevel {
    pub const ALL: [PriorityLevel; 5] = [
        PriorityLevel::Urgent,
        PriorityLevel::High,
        PriorityLevel::Normal,
        PriorityLevel::Low,
        PriorityLevel::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityLevel::Urgent => "urgent",
            PriorityLevel::High => "high",
            PriorityLevel::Normal => "normal",
            PriorityLevel::Low => "low",
            PriorityLevel::None => "none",
        }
    }

    fn from_rank(rank: i64) -> Self {
        match rank {
            1 => PriorityLevel::Urgent,
            2 => PriorityLevel::High,
            3 => PriorityLevel::Normal,
            4 => PriorityLevel::Low,
            _ => PriorityLevel::None,
        }
    }
}

/// Map a raw priority value to a level.
///
/// Objects are unwrapped through their `priority` field, then `id`.
/// Anything that does not coerce to an integer in 1..=4 is `None`.
pub fn normalize_priority(raw: Option<&Value>) -> PriorityLevel {
    let Some(value) = raw else {
        return PriorityLevel::None;
    };
    match value {
        Value::Object(map) => {
            let inner = map
                .get("priority")
                .filter(|v| !v.is_null())
                .or_else(|| map.get("id"));
            normalize_priority(inner)
        }
        Value::Number(n) => match n.as_i64() {
            Some(rank) => PriorityLevel::from_rank(rank),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0)
                .map(|f| PriorityLevel::from_rank(f as i64))
                .unwrap_or(PriorityLevel::None),
        },
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(PriorityLevel::from_rank)
            .unwrap_or(PriorityLevel::None),
        Value::Null | Value::Bool(_) | Value::Array(_) => PriorityLevel::None,
    }
}
