//! Property-based tests for request value presence and casting.
//!
//! Refer to `src/models/record.rs` for more details.
use pet_records::models::{coerce_integer, coerce_text, is_present};
use proptest::prelude::*;
use serde_json::{json, Value};

proptest! {
  /// Integers survive both as JSON numbers and as (padded) strings.
  #[test]
  fn prop_coerce_integer_accepts_integers(n in -1_000_000_000i64..1_000_000_000) {
      prop_assert_eq!(coerce_integer(&json!(n), "beds").unwrap(), n);
      prop_assert_eq!(coerce_integer(&json!(n.to_string()), "beds").unwrap(), n);
      prop_assert_eq!(coerce_integer(&json!(format!("  {} ", n)), "beds").unwrap(), n);
  }

  /// Alphabetic text never casts to an integer.
  #[test]
  fn prop_coerce_integer_rejects_words(word in "[a-zA-Z]{1,12}") {
      prop_assert!(coerce_integer(&json!(word), "age").is_err());
  }

  /// Non-zero numbers and non-empty strings are present.
  #[test]
  fn prop_is_present_non_empty(n in 1i64..i64::MAX, text in ".{1,16}") {
      prop_assert!(is_present(Some(&json!(n))));
      prop_assert!(is_present(Some(&json!(-n))));
      prop_assert!(is_present(Some(&json!(text))));
  }

  /// Text passes through unchanged, surrounding spaces included.
  #[test]
  fn prop_coerce_text_keeps_text(text in "[a-zA-Z ]{0,16}") {
      prop_assert_eq!(coerce_text(&json!(text.clone()), "name").unwrap(), text);
  }
}

#[test]
fn test_is_present_missing_values() {
    assert!(!is_present(None));
    assert!(!is_present(Some(&Value::Null)));
    assert!(!is_present(Some(&json!(0))));
    assert!(!is_present(Some(&json!(0.0))));
    assert!(!is_present(Some(&json!(""))));
    assert!(!is_present(Some(&json!(false))));
    // a string zero is still text
    assert!(is_present(Some(&json!("0"))));
}
