//! Typed wrappers over FootPrints record payloads.
//!
//! A [`Ticket`] or [`Item`] keeps the raw payload the service returned and a
//! flat, snake_case view of its interesting attributes. Both borrow the
//! [`Requester`](crate::requester::Requester) that fetched them so they can
//! issue follow-up edits.

mod item;
mod ticket;

pub use item::Item;
pub use ticket::Ticket;

use std::fmt;

use serde_json::Value;

use crate::attributes::{extract_attributes, FieldDescriptor, COMMON_ATTRS};
use crate::error::{FootprintsError, Result, ServiceErrorKind};
use crate::keys::{transform_keys, Convention};
use crate::requester::Requester;
use crate::Params;

/// Identifier fields kept alongside the attributes extracted from `_itemFields`.
const IDENTIFIER_FIELDS: [&str; 4] = [
    "_itemId",
    "_itemDefinitionId",
    "_ticketDefinitionId",
    "_ticketNumber",
];

/// Maximum number of attributes shown by `Display`.
const DISPLAY_ATTRIBUTES: usize = 8;

/// Shared state of a typed record.
#[derive(Clone)]
pub(crate) struct Record<'a> {
    requester: &'a Requester,
    attributes: Params,
    original: Value,
}

impl<'a> Record<'a> {
    pub(crate) fn new(
        requester: &'a Requester,
        payload: Value,
        custom: Option<&[&str]>,
    ) -> Result<Self> {
        let attributes = normalize_attributes(&payload, custom)?;
        Ok(Self {
            requester,
            attributes,
            original: payload,
        })
    }

    pub(crate) fn requester(&self) -> &'a Requester {
        self.requester
    }

    pub(crate) fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|value| !value.is_null())
    }

    pub(crate) fn attributes(&self) -> &Params {
        &self.attributes
    }

    pub(crate) fn original(&self) -> &Value {
        &self.original
    }

    pub(crate) fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.original)?)
    }

    /// Writes `Name(key='value', ...)`.
    pub(crate) fn fmt_named(&self, name: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", name, pretty_attributes(&self.attributes, DISPLAY_ATTRIBUTES))
    }
}

/// Builds the flat attribute view of a record payload.
///
/// - A payload with `_itemFields` yields the common attributes found in
///   `_itemFields.itemFields`, plus the identifier fields it carries.
/// - Any other mapping is used as-is.
/// - With `custom`, the named attributes in `_customFields.itemFields` are
///   added on top.
/// - If any key starts with `_`, every key is converted to snake_case.
///
/// # Errors
///
/// Returns `ResourceDoesNotExist` if the payload is not a mapping.
pub(crate) fn normalize_attributes(payload: &Value, custom: Option<&[&str]>) -> Result<Params> {
    let Value::Object(raw) = payload else {
        return Err(FootprintsError::service(ServiceErrorKind::ResourceDoesNotExist));
    };

    let mut attributes = match raw.get("_itemFields") {
        Some(item_fields) => {
            let fields = item_fields.get("itemFields").unwrap_or(&Value::Null);
            let descriptors = FieldDescriptor::from_value(fields);
            let mut attributes: Params = extract_attributes(&descriptors, COMMON_ATTRS)
                .into_iter()
                .collect();
            for field in IDENTIFIER_FIELDS {
                if let Some(value) = raw.get(field) {
                    attributes.insert(field.to_string(), value.clone());
                }
            }
            attributes
        }
        None => raw.clone(),
    };

    if let Some(custom) = custom {
        if let Some(fields) = raw.get("_customFields").and_then(|c| c.get("itemFields")) {
            let descriptors = FieldDescriptor::from_value(fields);
            attributes.extend(extract_attributes(&descriptors, custom));
        }
    }

    if attributes.keys().any(|key| key.starts_with('_')) {
        attributes = transform_keys(&attributes, Convention::SnakeCase);
    }

    Ok(attributes)
}

/// Renders up to `max` non-null attributes as `key=value` pairs.
/// Integers and booleans are bare; everything else is quoted.
pub(crate) fn pretty_attributes(attributes: &Params, max: usize) -> String {
    attributes
        .iter()
        .filter(|(_, value)| !value.is_null())
        .take(max)
        .map(|(key, value)| match value {
            Value::Number(n) if n.is_i64() || n.is_u64() => format!("{}={}", key, n),
            Value::Bool(b) => format!("{}={}", key, b),
            Value::String(s) => format!("{}='{}'", key, s),
            other => format!("{}='{}'", key, other),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Reads an identifier result (a string, or a number rendered as one).
///
/// # Errors
///
/// Returns `ResourceDoesNotExist` for any other shape.
pub(crate) fn identifier(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(FootprintsError::service(ServiceErrorKind::ResourceDoesNotExist)),
    }
}
