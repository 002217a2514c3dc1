//! Structural response checks.
//!
//! A [`ShapeCheck`] inspects the raw JSON before it is decoded. The
//! [`ValidationPolicy`] decides what a failing check means: `Enforce` (the default)
//! fails the call, `Warn` logs and lets the decode proceed.

use serde::Deserialize;
use serde_json::Value;

/// Outcome of a [`ShapeCheck`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeOutcome {
    Valid,
    Invalid(String),
}

impl ShapeOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ShapeOutcome::Valid)
    }
}

/// Inspects a raw response body.
pub type ShapeCheck = fn(&Value) -> ShapeOutcome;

/// What to do when a [`ShapeCheck`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    #[default]
    Enforce,
    Warn,
}

/// Checks that `value` is an object carrying every field in `fields` (non-null).
pub fn require_fields(value: &Value, fields: &[&str]) -> ShapeOutcome {
    let Some(object) = value.as_object() else {
        return ShapeOutcome::Invalid(format!("expected object, got {}", kind(value)));
    };
    let missing: Vec<&str> = fields
        .iter()
        .copied()
        .filter(|field| object.get(*field).map_or(true, Value::is_null))
        .collect();
    if missing.is_empty() {
        ShapeOutcome::Valid
    } else {
        ShapeOutcome::Invalid(format!("missing fields: {}", missing.join(", ")))
    }
}

/// Applies `item` to every element of a JSON array.
pub fn each_item(value: &Value, item: Option<ShapeCheck>) -> ShapeOutcome {
    let Some(items) = value.as_array() else {
        return ShapeOutcome::Invalid(format!("expected array, got {}", kind(value)));
    };
    let Some(item) = item else {
        return ShapeOutcome::Valid;
    };
    items
        .iter()
        .enumerate()
        .find_map(|(index, value)| match item(value) {
            ShapeOutcome::Valid => None,
            ShapeOutcome::Invalid(reason) => {
                Some(ShapeOutcome::Invalid(format!("item {index}: {reason}")))
            }
        })
        .unwrap_or(ShapeOutcome::Valid)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn require_fields_reports_missing_and_null() {
        let outcome = require_fields(&json!({"id": "1", "title": null}), &["id", "title", "company_id"]);
        assert_eq!(
            outcome,
            ShapeOutcome::Invalid("missing fields: title, company_id".to_string())
        );
        assert!(require_fields(&json!({"id": "1", "title": "x"}), &["id", "title"]).is_valid());
    }

    #[test]
    fn require_fields_rejects_non_objects() {
        assert_eq!(
            require_fields(&json!([1, 2]), &["id"]),
            ShapeOutcome::Invalid("expected object, got array".to_string())
        );
    }

    #[test]
    fn each_item_points_at_first_bad_element() {
        fn has_id(v: &Value) -> ShapeOutcome {
            require_fields(v, &["id"])
        }
        let outcome = each_item(&json!([{"id": 1}, {"name": "x"}]), Some(has_id));
        assert_eq!(
            outcome,
            ShapeOutcome::Invalid("item 1: missing fields: id".to_string())
        );
        assert!(each_item(&json!([]), Some(has_id)).is_valid());
        assert!(!each_item(&json!({}), None).is_valid());
    }

    #[test]
    fn policy_defaults_to_enforce() {
        assert_eq!(ValidationPolicy::default(), ValidationPolicy::Enforce);
    }
}
