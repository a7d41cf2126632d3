//! ## Sets up logging by reading configuration from environment variables.
//!
//! Environment variables used:
//! - LOG_MODE: "stdout" (default) or "file"
//! - LOG_LEVEL: log level ("trace", "debug", "info", "warn", "error"); default is "info"
//! - LOG_DATA_DIR: when using file mode, the directory for log files (default "./logs")
//! - LOG_MAX_SIZE: size in bytes after which a new numbered file is started (default 1GB)
//!
//! In file mode the active file is `{dir}/pet-records-{date}.{n}.log`.

use chrono::Utc;
use log::info;
use simplelog::{Config, LevelFilter, SimpleLogger, WriteLogger};
use std::{
    env,
    fs::{create_dir_all, metadata, File, OpenOptions},
    io,
    path::Path,
};
use thiserror::Error;

const DEFAULT_LOG_FILE_NAME: &str = "pet-records.log";
const DEFAULT_MAX_SIZE: u64 = 1_073_741_824;

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("LOG_MAX_SIZE must be a valid u64 if set, got '{0}'")]
    InvalidMaxSize(String),
    #[error("Unable to prepare log file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to initialize logger: {0}")]
    Init(#[from] log::SetLoggerError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    Stdout,
    File,
}

/// Logging settings resolved from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    pub mode: LogMode,
    pub level: LevelFilter,
    pub data_dir: String,
    pub max_size: u64,
}

impl LogSettings {
    pub fn from_env() -> Result<Self, LoggingError> {
        let mode = match env::var("LOG_MODE") {
            Ok(mode) if mode.eq_ignore_ascii_case("file") => LogMode::File,
            _ => LogMode::Stdout,
        };

        let level = parse_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        let data_dir = env::var("LOG_DATA_DIR").unwrap_or_else(|_| "./logs".to_string());

        let max_size = match env::var("LOG_MAX_SIZE") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| LoggingError::InvalidMaxSize(raw))?,
            Err(_) => DEFAULT_MAX_SIZE,
        };

        Ok(Self {
            mode,
            level,
            data_dir,
            max_size,
        })
    }

    /// Base path that rolled file names are derived from.
    pub fn base_file_path(&self) -> String {
        format!(
            "{}/{}",
            self.data_dir.trim_end_matches('/'),
            DEFAULT_LOG_FILE_NAME
        )
    }
}

/// Unknown level names fall back to `Info`.
pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// Computes the path of the rolled log file given the base file path and the date string.
pub fn compute_rolled_file_path(base_file_path: &str, date_str: &str, index: u32) -> String {
    let stem = base_file_path
        .strip_suffix(".log")
        .unwrap_or(base_file_path);
    format!("{}-{}.{}.log", stem, date_str, index)
}

/// Generates a time-based log file name.
pub fn time_based_rolling(base_file_path: &str, date_str: &str, index: u32) -> String {
    compute_rolled_file_path(base_file_path, date_str, index)
}

/// Returns the first rolled path, starting at `file_path`, whose file is
/// missing or not larger than `max_size` bytes.
pub fn space_based_rolling(
    file_path: &str,
    base_file_path: &str,
    date_str: &str,
    max_size: u64,
) -> String {
    let mut final_path = file_path.to_string();
    let mut index = 1;
    while let Ok(metadata) = metadata(&final_path) {
        if metadata.len() > max_size {
            final_path = compute_rolled_file_path(base_file_path, date_str, index);
            index += 1;
        } else {
            break;
        }
    }
    final_path
}

/// Resolves today's log file for `settings`, creating its directory.
pub fn resolve_log_file_path(settings: &LogSettings, date_str: &str) -> Result<String, LoggingError> {
    let base_file_path = settings.base_file_path();
    let time_based_path = time_based_rolling(&base_file_path, date_str, 1);

    if let Some(parent) = Path::new(&time_based_path).parent() {
        create_dir_all(parent).map_err(|source| LoggingError::Io {
            path: parent.display().to_string(),
            source,
        })?;
    }

    Ok(space_based_rolling(
        &time_based_path,
        &base_file_path,
        date_str,
        settings.max_size,
    ))
}

/// Opens `path` for appending, creating it if needed.
pub fn open_log_file(path: &str) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::Io {
            path: path.to_string(),
            source,
        })
}

/// Sets up logging by reading configuration from environment variables.
pub fn setup_logging() -> Result<(), LoggingError> {
    let settings = LogSettings::from_env()?;

    match settings.mode {
        LogMode::File => {
            let date_str = Utc::now().format("%Y-%m-%d").to_string();
            let final_path = resolve_log_file_path(&settings, &date_str)?;
            let log_file = open_log_file(&final_path)?;
            WriteLogger::init(settings.level, Config::default(), log_file)?;
            info!("Logging to file {} at level {}", final_path, settings.level);
        }
        LogMode::Stdout => {
            SimpleLogger::init(settings.level, Config::default())?;
        }
    }

    info!("Logging is successfully configured (mode: {:?})", settings.mode);
    Ok(())
}
