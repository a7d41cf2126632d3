//! Error types for the configuration system.
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid storage type: {0}")]
    InvalidStorageType(String),
    #[error("Missing required setting: {0}")]
    MissingSetting(String),
}
