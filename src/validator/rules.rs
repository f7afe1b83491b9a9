//! Constraint rules
//!
//! One free function per rule. Each returns `Ok(())` when the rule does not
//! apply or passes, and the matching [`Error`] variant otherwise.

use crate::error::{Error, Result};
use crate::template::{Constraints, TypeTag};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// `/` or a single letter, then letters, digits and slashes, then `.ext`
static FILE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:/|[A-Za-z])[A-Za-z0-9/]*\.[A-Za-z]+$").expect("file path grammar is valid")
});

/// `/` or a single letter, then letters, digits and slashes
static FOLDER_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:/|[A-Za-z])[A-Za-z0-9/]*$").expect("folder path grammar is valid")
});

pub(crate) fn is_file_path(text: &str) -> bool {
    FILE_PATH.is_match(text)
}

pub(crate) fn is_folder_path(text: &str) -> bool {
    FOLDER_PATH.is_match(text)
}

// =============================================================================
// Type
// =============================================================================

/// Base kind check followed by the path grammar or list element checks
pub(crate) fn check_type(
    key: &str,
    tag: TypeTag,
    list_contents: Option<TypeTag>,
    value: &Value,
) -> Result<()> {
    if !tag.matches_kind(value) {
        return Err(Error::TypeMismatch {
            key: key.to_string(),
            expected: tag.display_name(),
        });
    }

    match (tag, value) {
        (TypeTag::FilePath, Value::String(text)) if !is_file_path(text) => {
            Err(Error::InvalidFilePath {
                key: key.to_string(),
            })
        }
        (TypeTag::FolderPath, Value::String(text)) if !is_folder_path(text) => {
            Err(Error::InvalidFolderPath {
                key: key.to_string(),
            })
        }
        (TypeTag::List, Value::Array(items)) => match list_contents {
            Some(element) => check_list_contents(key, element, items),
            None => Ok(()),
        },
        _ => Ok(()),
    }
}

fn check_list_contents(key: &str, element: TypeTag, items: &[Value]) -> Result<()> {
    match items.iter().position(|item| !element_matches(element, item)) {
        Some(index) => Err(Error::InvalidListElement {
            key: key.to_string(),
            index,
            expected: element.display_name(),
        }),
        None => Ok(()),
    }
}

/// Element check for `listContents`
///
/// `object` elements are not validated any further, so any element passes.
fn element_matches(element: TypeTag, item: &Value) -> bool {
    match element {
        TypeTag::Object => true,
        TypeTag::FilePath => item.as_str().is_some_and(is_file_path),
        TypeTag::FolderPath => item.as_str().is_some_and(is_folder_path),
        TypeTag::String | TypeTag::Number | TypeTag::Boolean | TypeTag::List => {
            element.matches_kind(item)
        }
    }
}

// =============================================================================
// Constraints
// =============================================================================

/// Run every declared constraint, in fixed order, stopping at the first failure
pub(crate) fn check_constraints(key: &str, constraints: &Constraints, value: &Value) -> Result<()> {
    check_required(key, constraints.required, true)?;
    check_min_value(key, constraints.min_value, value)?;
    check_max_value(key, constraints.max_value, value)?;
    check_min_length(key, constraints.min_length, value)?;
    check_max_length(key, constraints.max_length, value)?;
    check_accepted_values(key, constraints.accepted_values.as_deref(), value)?;
    check_not_accepted_values(key, constraints.not_accepted_values.as_deref(), value)?;
    check_regex_format(key, constraints, value)
}

pub(crate) fn check_required(key: &str, required: bool, present: bool) -> Result<()> {
    if required && !present {
        return Err(Error::MissingRequired {
            key: key.to_string(),
        });
    }
    Ok(())
}

fn check_min_value(key: &str, min: Option<f64>, value: &Value) -> Result<()> {
    match (min, value.as_f64()) {
        (Some(min), Some(num)) if num < min => Err(Error::BelowMinValue {
            key: key.to_string(),
            limit: min - 1.0,
        }),
        _ => Ok(()),
    }
}

fn check_max_value(key: &str, max: Option<f64>, value: &Value) -> Result<()> {
    match (max, value.as_f64()) {
        (Some(max), Some(num)) if num > max => Err(Error::AboveMaxValue {
            key: key.to_string(),
            limit: max + 1.0,
        }),
        _ => Ok(()),
    }
}

fn check_min_length(key: &str, min: Option<usize>, value: &Value) -> Result<()> {
    match (min, value_length(value)) {
        (Some(min), Some(len)) if len < min => Err(Error::BelowMinLength {
            key: key.to_string(),
            limit: min - 1,
        }),
        _ => Ok(()),
    }
}

fn check_max_length(key: &str, max: Option<usize>, value: &Value) -> Result<()> {
    match (max, value_length(value)) {
        (Some(max), Some(len)) if len > max => Err(Error::AboveMaxLength {
            key: key.to_string(),
            limit: max + 1,
        }),
        _ => Ok(()),
    }
}

fn check_accepted_values(key: &str, accepted: Option<&[Value]>, value: &Value) -> Result<()> {
    let Some(accepted) = accepted else {
        return Ok(());
    };
    if accepted.iter().any(|candidate| values_equal(candidate, value)) {
        return Ok(());
    }

    Err(Error::NotAccepted {
        key: key.to_string(),
        value: stringify(value),
        accepted: accepted.iter().map(stringify).collect::<Vec<_>>().join(", "),
    })
}

fn check_not_accepted_values(key: &str, rejected: Option<&[Value]>, value: &Value) -> Result<()> {
    match rejected {
        Some(rejected) if rejected.iter().any(|candidate| values_equal(candidate, value)) => {
            Err(Error::Rejected {
                key: key.to_string(),
                value: stringify(value),
            })
        }
        _ => Ok(()),
    }
}

fn check_regex_format(key: &str, constraints: &Constraints, value: &Value) -> Result<()> {
    match constraints.regex_format {
        Some(ref pattern) if !pattern.is_match(&stringify(value)) => Err(Error::FormatMismatch {
            key: key.to_string(),
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Value Helpers
// =============================================================================

/// Characters for strings, elements for lists, entries for objects
pub(crate) fn value_length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        Value::Null | Value::Bool(_) | Value::Number(_) => None,
    }
}

/// Text form used for regex matching and error messages
pub(crate) fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        // Integral floats print without a trailing `.0`, like integers
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 => format!("{f}"),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// Structural equality, except numbers compare by value (`1 == 1.0`)
pub(crate) fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => x.as_f64() == y.as_f64(),
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xm), Value::Object(ym)) => {
            xm.len() == ym.len()
                && xm
                    .iter()
                    .all(|(k, x)| ym.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}
