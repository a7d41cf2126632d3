//! Shared schema behaviour for persisted records.
//!
//! Request payloads arrive either as JSON or as url-encoded forms, so field
//! values are kept as loose [`serde_json::Value`]s until a record is built.
//! The helpers here apply the same presence and casting rules to both.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::fmt;

use crate::models::RepositoryError;

/// Placeholder text used for tracker slots before anything was created.
pub const UNKNOWN: &str = "unknown";

/// A document persisted by a record repository.
pub trait Record:
    fmt::Debug + Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Collection label, used for key names, logs and metric labels.
    const ENTITY: &'static str;
    /// Whether `name` must be unique across the collection.
    const UNIQUE_NAME: bool;

    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn created_date(&self) -> DateTime<Utc>;

    /// Checks the schema constraints that the store enforces on write.
    fn validate(&self) -> Result<(), RepositoryError>;
}

/// Presence check for a required request field.
///
/// Absent, `null`, `false`, empty strings and numeric zero all count as
/// missing.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Casts a request value to text. Whitespace is kept; the models trim the
/// fields they store.
pub fn coerce_text(value: &Value, field: &str) -> Result<String, RepositoryError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        _ => Err(RepositoryError::InvalidData(format!(
            "Cast to string failed for value {} at path \"{}\"",
            value, field
        ))),
    }
}

/// Casts a request value to an integer.
///
/// Numbers and numeric strings are accepted; fractional values are not.
pub fn coerce_integer(value: &Value, field: &str) -> Result<i64, RepositoryError> {
    let cast_error = || {
        RepositoryError::InvalidData(format!(
            "Cast to integer failed for value {} at path \"{}\"",
            value, field
        ))
    };

    match value {
        Value::Number(number) => match number.as_i64() {
            Some(n) => Ok(n),
            None => number
                .as_f64()
                .filter(|n| n.fract() == 0.0 && n.abs() < i64::MAX as f64)
                .map(|n| n as i64)
                .ok_or_else(cast_error),
        },
        Value::String(text) => {
            let trimmed = text.trim();
            if let Ok(n) = trimmed.parse::<i64>() {
                return Ok(n);
            }
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64)
                .map(|n| n as i64)
                .ok_or_else(cast_error)
        }
        _ => Err(cast_error()),
    }
}

/// Fails with a validation error when a required text field is blank.
pub fn require_text(value: &str, field: &str, entity: &str) -> Result<(), RepositoryError> {
    if value.trim().is_empty() {
        return Err(RepositoryError::InvalidData(format!(
            "{} validation failed: {}: Path `{}` is required.",
            entity, field, field
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_present_follows_truthiness() {
        assert!(!is_present(None));
        assert!(!is_present(Some(&Value::Null)));
        assert!(!is_present(Some(&json!(""))));
        assert!(!is_present(Some(&json!(0))));
        assert!(!is_present(Some(&json!(0.0))));
        assert!(!is_present(Some(&json!(false))));

        assert!(is_present(Some(&json!("0"))));
        assert!(is_present(Some(&json!(3))));
        assert!(is_present(Some(&json!(-1))));
        assert!(is_present(Some(&json!(" "))));
    }

    #[test]
    fn test_coerce_integer_accepts_numbers_and_numeric_text() {
        assert_eq!(coerce_integer(&json!(3), "beds").unwrap(), 3);
        assert_eq!(coerce_integer(&json!(4.0), "beds").unwrap(), 4);
        assert_eq!(coerce_integer(&json!(" 12 "), "beds").unwrap(), 12);
        assert_eq!(coerce_integer(&json!("-2"), "age").unwrap(), -2);
        assert_eq!(coerce_integer(&json!("7.0"), "age").unwrap(), 7);
    }

    #[test]
    fn test_coerce_integer_rejects_other_values() {
        for value in [json!("many"), json!(2.5), json!(true), json!([1]), json!("NaN")] {
            let result = coerce_integer(&value, "beds");
            assert!(
                matches!(result, Err(RepositoryError::InvalidData(ref msg)) if msg.contains("beds")),
                "expected cast failure for {}",
                value
            );
        }
    }

    #[test]
    fn test_coerce_text_keeps_whitespace_and_stringifies() {
        assert_eq!(coerce_text(&json!("  Rex "), "name").unwrap(), "  Rex ");
        assert_eq!(coerce_text(&json!(42), "name").unwrap(), "42");
        assert!(coerce_text(&json!({"a": 1}), "name").is_err());
    }

    #[test]
    fn test_require_text() {
        assert!(require_text("Tom", "name", "Cat").is_ok());
        let err = require_text("   ", "name", "Cat").unwrap_err();
        assert_eq!(
            err,
            RepositoryError::InvalidData(
                "Cat validation failed: name: Path `name` is required.".to_string()
            )
        );
    }
}
