//! Integration tests for file logging.
//!
//! Environment variables used:
//! - LOG_MODE: "stdout" (default) or "file"
//! - LOG_LEVEL: log level ("trace", "debug", "info", "warn", "error"); default is "info"
//! - LOG_DATA_DIR: when using file mode, the directory for log files (default "./logs")
//!   Refer to `src/logging/mod.rs` for more details.
use chrono::Utc;
use pet_records::logging::{
    setup_logging, space_based_rolling, time_based_rolling, LogSettings, LoggingError,
};
use std::{env, fs, io::Write, path::Path, sync::Mutex, thread, time::Duration};
use tempfile::TempDir;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

pub fn compute_final_log_path(base_file_path: &str, date_str: &str, max_size: u64) -> String {
    let time_based_path = time_based_rolling(base_file_path, date_str, 1);
    space_based_rolling(&time_based_path, base_file_path, date_str, max_size)
}

#[test]
fn test_invalid_log_max_size() {
    let _guard = ENV_MUTEX
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    env::set_var("LOG_MODE", "file");
    env::set_var("LOG_DATA_DIR", temp_dir.path());
    env::set_var("LOG_MAX_SIZE", "invalid_value");

    let result = setup_logging();
    assert!(matches!(result, Err(LoggingError::InvalidMaxSize(_))));

    env::remove_var("LOG_MAX_SIZE");
    env::remove_var("LOG_MODE");
    env::remove_var("LOG_DATA_DIR");
}

#[test]
fn test_setup_logging_file_mode_creates_log_file() {
    let _guard = ENV_MUTEX
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let temp_log_dir = temp_dir.path().join("logs");

    env::remove_var("LOG_MAX_SIZE");
    env::set_var("LOG_MODE", "file");
    env::set_var("LOG_LEVEL", "debug");
    env::set_var("LOG_DATA_DIR", format!("{}/", temp_log_dir.display()));

    let settings = LogSettings::from_env().expect("valid log settings");
    setup_logging().expect("Failed to set up file logging");
    log::info!("file logging smoke test");

    // Give the logger a moment to flush.
    thread::sleep(Duration::from_millis(200));

    let date_str = Utc::now().format("%Y-%m-%d").to_string();
    let expected_path = time_based_rolling(&settings.base_file_path(), &date_str, 1);

    assert!(
        Path::new(&expected_path).exists(),
        "Expected log file {} does not exist",
        expected_path
    );

    env::remove_var("LOG_MODE");
    env::remove_var("LOG_LEVEL");
    env::remove_var("LOG_DATA_DIR");
}

#[test]
fn test_log_file_rolls_when_over_max_size() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let base_file = temp_dir.path().join("pet-records.log");
    let date_str = Utc::now().format("%Y-%m-%d").to_string();

    let first = time_based_rolling(base_file.to_str().unwrap(), &date_str, 1);
    fs::write(&first, "an existing log file well over ten bytes")
        .expect("Failed to create pre-existing log file");

    let rolled_path = compute_final_log_path(base_file.to_str().unwrap(), &date_str, 10);

    assert_ne!(rolled_path, first);
    assert!(rolled_path.ends_with(&format!("pet-records-{}.2.log", date_str)));
}

#[test]
fn test_space_based_rolling_returns_original_when_under_max_size() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let base_file_path = format!("{}/test_pets.log", temp_dir.path().display());
    let date_str = Utc::now().format("%Y-%m-%d").to_string();
    let time_based_path = time_based_rolling(&base_file_path, &date_str, 1);

    let mut file = fs::File::create(&time_based_path).expect("Failed to create test log file");
    write!(file, "small file").expect("Failed to write to test log file");

    let rolled_file_path = space_based_rolling(&time_based_path, &base_file_path, &date_str, 10_000);
    assert_eq!(rolled_file_path, time_based_path);
}
