//! Key casing conventions.
//!
//! FootPrints wire parameters use a "modified camel" convention: camelCase
//! prefixed with an underscore (`_itemDefinitionId`). Callers use snake_case.
//! This module converts single identifiers and the keys of a parameter
//! mapping between the three conventions.
//!
//! Only top-level keys are converted; nested mappings keep their casing.

use std::fmt;
use std::str::FromStr;

use crate::error::FootprintsError;
use crate::Params;

/// A key naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convention {
    /// `item_definition_id`
    SnakeCase,
    /// `itemDefinitionId`
    CamelCase,
    /// `_itemDefinitionId`
    ModifiedCamel,
}

impl Convention {
    /// Converts a single identifier to this convention.
    #[must_use]
    pub fn apply(self, value: &str) -> String {
        match self {
            Convention::SnakeCase => to_snake_case(value),
            Convention::CamelCase => to_camel_case(value),
            Convention::ModifiedCamel => to_modified_camel(value),
        }
    }

    /// The name accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Convention::SnakeCase => "snake_case",
            Convention::CamelCase => "camel_case",
            Convention::ModifiedCamel => "modified_camel",
        }
    }
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Convention {
    type Err = FootprintsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "snake_case" => Ok(Convention::SnakeCase),
            "camel_case" => Ok(Convention::CamelCase),
            "modified_camel" => Ok(Convention::ModifiedCamel),
            _ => Err(FootprintsError::invalid_argument(
                "Invalid parse type, use modified_camel, camel_case or snake_case",
            )),
        }
    }
}

/// Splits an identifier into words.
///
/// A word is a run of digits, an optional uppercase letter followed by
/// lowercase letters, or a run of two or more uppercase letters that is not
/// followed by a lowercase letter. When an uppercase run runs into a
/// lowercase letter, its last letter starts the next word (`HTTPServer` is
/// `HTTP` + `Server`). Anything else separates words.
pub fn split_words(value: &str) -> Vec<&str> {
    let bytes = value.as_bytes();
    let mut words = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b.is_ascii_digit() {
            let end = run_end(bytes, i, u8::is_ascii_digit);
            words.push(&value[i..end]);
            i = end;
        } else if b.is_ascii_lowercase() {
            let end = run_end(bytes, i, u8::is_ascii_lowercase);
            words.push(&value[i..end]);
            i = end;
        } else if b.is_ascii_uppercase() {
            let upper_end = run_end(bytes, i, u8::is_ascii_uppercase);
            let run_len = upper_end - i;
            let followed_by_lower = bytes
                .get(upper_end)
                .is_some_and(|next| next.is_ascii_lowercase());

            if followed_by_lower {
                // The last capital belongs to the following lowercase word.
                let word_start = upper_end - 1;
                if word_start - i >= 2 {
                    words.push(&value[i..word_start]);
                }
                let end = run_end(bytes, upper_end, u8::is_ascii_lowercase);
                words.push(&value[word_start..end]);
                i = end;
            } else {
                if run_len >= 2 {
                    words.push(&value[i..upper_end]);
                }
                i = upper_end;
            }
        } else {
            i += 1;
        }
    }

    words
}

fn run_end(bytes: &[u8], start: usize, pred: fn(&u8) -> bool) -> usize {
    bytes[start..]
        .iter()
        .position(|b| !pred(b))
        .map_or(bytes.len(), |offset| start + offset)
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
        }
        None => String::new(),
    }
}

/// Converts an identifier to snake_case.
///
/// ```
/// assert_eq!(footprints::keys::to_snake_case("_itemDefinitionId"), "item_definition_id");
/// ```
#[must_use]
pub fn to_snake_case(value: &str) -> String {
    split_words(value)
        .iter()
        .map(|w| w.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Converts an identifier to camelCase.
#[must_use]
pub fn to_camel_case(value: &str) -> String {
    let words = split_words(value);
    let mut out = String::with_capacity(value.len());
    if let Some((first, rest)) = words.split_first() {
        out.push_str(&first.to_ascii_lowercase());
        for word in rest {
            out.push_str(&title_case(word));
        }
    }
    out
}

/// Converts an identifier to the underscore-prefixed camelCase used on the wire.
#[must_use]
pub fn to_modified_camel(value: &str) -> String {
    format!("_{}", to_camel_case(value))
}

/// Rebuilds a mapping with every top-level key converted to `convention`.
///
/// Values and insertion order are preserved; nested mappings are untouched.
#[must_use]
pub fn transform_keys(data: &Params, convention: Convention) -> Params {
    data.iter()
        .map(|(key, value)| (convention.apply(key), value.clone()))
        .collect()
}

/// Like [`transform_keys`], naming the convention as a string.
///
/// # Errors
///
/// Returns `FootprintsError::InvalidArgument` if `convention` is not one of
/// `snake_case`, `camel_case` or `modified_camel`.
pub fn parse_keys(data: &Params, convention: &str) -> Result<Params, FootprintsError> {
    Ok(transform_keys(data, convention.parse()?))
}
