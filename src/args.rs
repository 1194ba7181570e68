//! Argument cleanup for outbound calls.
//!
//! Operation inputs serialize to a JSON mapping in which unset optional
//! arguments appear as `null`. Before anything is sent, those nulls and the
//! reserved call-context keys are stripped.

use serde_json::Value;

use crate::error::FootprintsError;
use crate::Params;

/// Keys that describe the call itself rather than a wire parameter.
pub const RESERVED_KEYS: [&str; 3] = ["self", "kwargs", "params"];

/// Filters a call's arguments down to the parameters destined for the wire.
///
/// Reserved keys and keys whose value is `null` are dropped. Falsy values
/// such as `0`, `""` and `false` are kept.
///
/// # Errors
///
/// - `FootprintsError::MissingArguments` if `args` is `null` or an empty mapping
/// - `FootprintsError::InvalidArgument` if `args` is not a mapping
pub fn cleanup_args(args: &Value) -> Result<Params, FootprintsError> {
    let map = match args {
        Value::Null => return Err(FootprintsError::missing_arguments("No arguments received.")),
        Value::Object(map) if map.is_empty() => {
            return Err(FootprintsError::missing_arguments("No arguments received."))
        }
        Value::Object(map) => map,
        _ => {
            return Err(FootprintsError::invalid_argument(
                "Args must be passed as a mapping.",
            ))
        }
    };

    Ok(map
        .iter()
        .filter(|(key, value)| !value.is_null() && !RESERVED_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect())
}

/// Checks that every name in `required` is present in `params`.
///
/// # Errors
///
/// Returns a `RequiredFieldMissing` service error naming the absent keys.
pub fn require_fields(params: &Params, required: &[&str]) -> Result<(), FootprintsError> {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|name| !params.contains_key(*name))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(FootprintsError::required_fields_missing(&missing))
    }
}
