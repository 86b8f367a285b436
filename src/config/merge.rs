//! Deep merge for tiered YAML configuration.
//!
//! Higher tiers override lower tiers field by field. Arrays are replaced
//! entirely, not concatenated.

use serde_json::Value;

/// Deep merge two JSON values, with `overlay` taking precedence over `base`.
///
/// - Objects merge recursively
/// - Null in the overlay keeps the base value ("not specified")
/// - Everything else in the overlay replaces the base
///
/// # Example
/// ```
/// use serde_json::json;
/// use list_insights::config::deep_merge;
///
/// let base = json!({"source": {"snapshot_dir": "snapshots", "list_ids": ["1"]}});
/// let overlay = json!({"source": {"list_ids": ["2", "3"]}});
/// let merged = deep_merge(base, overlay);
/// assert_eq!(merged["source"]["snapshot_dir"], "snapshots");
/// assert_eq!(merged["source"]["list_ids"], json!(["2", "3"]));
/// ```
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged_value = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                base_map.insert(key, merged_value);
            }
            Value::Object(base_map)
        }
        (base, Value::Null) => base,
        (_, overlay) => overlay,
    }
}

/// Merge values in order, later values winning.
pub fn deep_merge_all(values: impl IntoIterator<Item = Value>) -> Value {
    values.into_iter().fold(Value::Null, deep_merge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_override_keeps_siblings() {
        let base = json!({"report": {"format": "markdown", "utc_offset_minutes": 0}});
        let overlay = json!({"report": {"utc_offset_minutes": 120}});
        assert_eq!(
            deep_merge(base, overlay),
            json!({"report": {"format": "markdown", "utc_offset_minutes": 120}})
        );
    }

    #[test]
    fn test_list_ids_replaced_not_appended() {
        let base = json!({"source": {"list_ids": ["1", "2"]}});
        let overlay = json!({"source": {"list_ids": ["3"]}});
        assert_eq!(
            deep_merge(base, overlay),
            json!({"source": {"list_ids": ["3"]}})
        );
    }

    #[test]
    fn test_null_means_unspecified() {
        let base = json!({"report": {"period_days": 7}});
        let overlay = json!({"report": {"period_days": null}});
        assert_eq!(
            deep_merge(base, overlay),
            json!({"report": {"period_days": 7}})
        );
    }

    #[test]
    fn test_merge_all_in_tier_order() {
        let merged = deep_merge_all(vec![
            json!({"report": {"format": "markdown"}}),
            json!({"report": {"format": "json"}, "source": {"snapshot_dir": "a"}}),
            json!({"source": {"snapshot_dir": "b"}}),
        ]);
        assert_eq!(
            merged,
            json!({"report": {"format": "json"}, "source": {"snapshot_dir": "b"}})
        );
    }
}
