//! Field descriptor walking.
//!
//! FootPrints returns record fields as a list of descriptors:
//!
//! ```json
//! {"fieldName": "Title", "fieldValue": {"value": ["Printer jammed"]}}
//! ```
//!
//! [`extract_attributes`] pulls a chosen subset of those into flat
//! `(snake_case_key, value)` pairs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::keys::to_snake_case;

/// Attributes extracted from every record's `_itemFields`.
pub const COMMON_ATTRS: &[&str] = &[
    "Title",
    "Created By",
    "Full Name",
    "Priority",
    "Status",
    "User ID",
    "Description",
    "Email Address",
];

/// Organisation-specific attributes extracted from a ticket's `_customFields`.
pub const CUSTOM_ATTRS: &[&str] = &[
    "Escalation Status",
    "Email Assignees",
    "PreEscalation",
    "Email Address",
    "Assignees",
    "CC Email",
    "Internal",
    "Service",
    "Details",
    "Email CC",
    "Full Name",
];

/// One named field of a record as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// External field name, e.g. `Title`.
    #[serde(rename = "fieldName")]
    pub field_name: String,

    /// Value wrapper, normally `{"value": ...}`.
    #[serde(rename = "fieldValue", default)]
    pub field_value: Value,
}

impl FieldDescriptor {
    /// Creates a descriptor with a wrapped value.
    pub fn new(field_name: impl Into<String>, value: Value) -> Self {
        Self {
            field_name: field_name.into(),
            field_value: serde_json::json!({ "value": value }),
        }
    }

    /// The wrapped value; `null` when the wrapper is absent or malformed.
    pub fn value(&self) -> Value {
        self.field_value
            .get("value")
            .cloned()
            .unwrap_or(Value::Null)
    }

    /// Reads descriptors from a decoded payload.
    ///
    /// Accepts an array of descriptors, or a bare descriptor object (a list
    /// with one entry decodes that way). Entries without a string
    /// `fieldName` are skipped.
    pub fn from_value(value: &Value) -> Vec<Self> {
        let entries: &[Value] = match value {
            Value::Array(items) => items,
            Value::Object(_) => std::slice::from_ref(value),
            _ => return Vec::new(),
        };

        entries
            .iter()
            .filter_map(|entry| {
                let field_name = entry.get("fieldName")?.as_str()?;
                Some(Self {
                    field_name: field_name.to_string(),
                    field_value: entry.get("fieldValue").cloned().unwrap_or(Value::Null),
                })
            })
            .collect()
    }
}

/// Extracts the descriptors named in `targets`.
///
/// Names match case-insensitively. Each match yields the lowercased field
/// name in snake_case and its value, with single-element lists unwrapped.
/// Output follows descriptor order; targets with no descriptor are absent.
pub fn extract_attributes(
    descriptors: &[FieldDescriptor],
    targets: &[&str],
) -> Vec<(String, Value)> {
    let targets: Vec<String> = targets.iter().map(|t| t.to_lowercase()).collect();

    descriptors
        .iter()
        .filter_map(|descriptor| {
            let label = descriptor.field_name.to_lowercase();
            if !targets.contains(&label) {
                return None;
            }
            let value = match descriptor.value() {
                Value::Array(mut items) if items.len() == 1 => items.remove(0),
                other => other,
            };
            Some((to_snake_case(&label), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_single_element_list_is_unwrapped() {
        let descriptors = FieldDescriptor::from_value(&json!([
            {"fieldName": "Title", "fieldValue": {"value": ["Hello"]}}
        ]));
        let attrs = extract_attributes(&descriptors, &["Title"]);
        assert_eq!(attrs, vec![("title".to_string(), json!("Hello"))]);
    }

    #[test]
    fn test_multi_element_list_passes_through() {
        let descriptors = vec![FieldDescriptor::new("Assignees", json!(["ann", "bob"]))];
        let attrs = extract_attributes(&descriptors, CUSTOM_ATTRS);
        assert_eq!(attrs, vec![("assignees".to_string(), json!(["ann", "bob"]))]);
    }

    #[test]
    fn test_case_insensitive_match_and_order() {
        let descriptors = FieldDescriptor::from_value(&json!([
            {"fieldName": "STATUS", "fieldValue": {"value": "Open"}},
            {"fieldName": "Ignored", "fieldValue": {"value": "x"}},
            {"fieldName": "created by", "fieldValue": {"value": "jdoe"}},
            {"fieldName": "User ID", "fieldValue": {"value": "7"}}
        ]));
        let attrs = extract_attributes(&descriptors, COMMON_ATTRS);
        let keys: Vec<&str> = attrs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["status", "created_by", "user_id"]);
    }

    #[test]
    fn test_malformed_wrapper_is_null() {
        let descriptors = FieldDescriptor::from_value(&json!([
            {"fieldName": "Priority", "fieldValue": null},
            {"fieldName": "Status"},
            {"fieldName": "Title", "fieldValue": "not a wrapper"}
        ]));
        let attrs = extract_attributes(&descriptors, COMMON_ATTRS);
        assert_eq!(
            attrs,
            vec![
                ("priority".to_string(), Value::Null),
                ("status".to_string(), Value::Null),
                ("title".to_string(), Value::Null),
            ]
        );
    }

    #[test]
    fn test_from_value_accepts_single_object() {
        let descriptors = FieldDescriptor::from_value(&json!({
            "fieldName": "Title",
            "fieldValue": {"value": "One"}
        }));
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].value(), json!("One"));
    }

    #[test]
    fn test_from_value_skips_nameless_entries() {
        let descriptors = FieldDescriptor::from_value(&json!([{"fieldValue": {"value": 1}}, 42]));
        assert!(descriptors.is_empty());
        assert!(FieldDescriptor::from_value(&json!("text")).is_empty());
    }

    #[test]
    fn test_empty_targets_extract_nothing() {
        let descriptors = vec![FieldDescriptor::new("Title", json!("x"))];
        assert!(extract_attributes(&descriptors, &[]).is_empty());
    }
}
