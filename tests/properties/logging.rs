//! Property-based tests for log file naming.
//!
//! Refer to `src/logging/mod.rs` for more details.
use pet_records::logging::{compute_rolled_file_path, parse_level};
use proptest::{prelude::*, test_runner::Config};
use simplelog::LevelFilter;

proptest! {
  #![proptest_config(Config {
    cases: 1000, ..Config::default()
  })]

  /// A ".log" suffix is replaced by the date and index.
  #[test]
  fn prop_compute_rolled_file_path_with_log_suffix(
    base in "[a-z/_-]{0,24}",
    date in "[0-9]{4}-[0-9]{2}-[0-9]{2}",
    index in 1u32..100
  ) {
      let base_with_log = format!("{}.log", base);
      let result = compute_rolled_file_path(&base_with_log, &date, index);
      prop_assert_eq!(result, format!("{}-{}.{}.log", base, date, index));
  }

  /// Other bases keep their full name in front of the date.
  #[test]
  fn prop_compute_rolled_file_path_without_log_suffix(
    base in ".*",
    date in "[0-9]{4}-[0-9]{2}-[0-9]{2}"
  ) {
      let base_non_log = if base.ends_with(".log") {
        format!("{}x", base)
      } else {
        base
      };
      let result = compute_rolled_file_path(&base_non_log, &date, 1);
      prop_assert_eq!(result, format!("{}-{}.1.log", base_non_log, date));
  }

  /// Unrecognised level names fall back to info.
  #[test]
  fn prop_parse_level_unknown_is_info(level in "[0-9]{1,8}") {
      prop_assert_eq!(parse_level(&level), LevelFilter::Info);
  }
}
