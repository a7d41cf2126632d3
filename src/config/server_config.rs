/// Configuration for the server, including storage and rate limiting settings.
use std::{env, fmt, str::FromStr};

use crate::config::ConfigError;

/// Backend used by the record repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepositoryStorageType {
    #[default]
    InMemory,
    Redis,
}

impl FromStr for RepositoryStorageType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            "redis" => Ok(Self::Redis),
            other => Err(ConfigError::InvalidStorageType(other.to_string())),
        }
    }
}

impl fmt::Display for RepositoryStorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InMemory => write!(f, "in_memory"),
            Self::Redis => write!(f, "redis"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The host address the server will bind to.
    pub host: String,
    /// The port number the server will listen on.
    pub port: u16,
    /// Which backend stores cats and dogs.
    pub repository_storage_type: RepositoryStorageType,
    /// The URL for the Redis instance.
    pub redis_url: String,
    /// Prefix for every Redis key written by the service.
    pub redis_key_prefix: String,
    /// How long to wait for the initial Redis connection.
    pub redis_connection_timeout_ms: u64,
    /// Drop all stored records during startup.
    pub reset_storage_on_start: bool,
    /// The number of requests allowed per second.
    pub rate_limit_requests_per_second: u64,
    /// The maximum burst size for rate limiting.
    pub rate_limit_burst_size: u32,
    /// Record request metrics and expose the metrics routes.
    pub metrics_enabled: bool,
}

impl ServerConfig {
    /// Creates a new `ServerConfig` instance from environment variables.
    ///
    /// # Defaults
    ///
    /// - `HOST` defaults to `"0.0.0.0"`.
    /// - `APP_PORT` defaults to `3000`.
    /// - `REPOSITORY_STORAGE_TYPE` defaults to `in_memory`.
    /// - `REDIS_URL` defaults to `"redis://127.0.0.1:6379"`.
    /// - `REDIS_KEY_PREFIX` defaults to `"pets"`.
    /// - `REDIS_CONNECTION_TIMEOUT_MS` defaults to `10000`.
    /// - `RESET_STORAGE_ON_START` defaults to `false`.
    /// - `RATE_LIMIT_REQUESTS_PER_SECOND` defaults to `100`.
    /// - `RATE_LIMIT_BURST_SIZE` defaults to `300`.
    /// - `METRICS_ENABLED` defaults to `true`.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_env("APP_PORT", 3000),
            repository_storage_type: env::var("REPOSITORY_STORAGE_TYPE")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or_default(),
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            redis_key_prefix: env::var("REDIS_KEY_PREFIX").unwrap_or_else(|_| "pets".to_string()),
            redis_connection_timeout_ms: parse_env("REDIS_CONNECTION_TIMEOUT_MS", 10000),
            reset_storage_on_start: parse_flag("RESET_STORAGE_ON_START", false),
            rate_limit_requests_per_second: parse_env("RATE_LIMIT_REQUESTS_PER_SECOND", 100),
            rate_limit_burst_size: parse_env("RATE_LIMIT_BURST_SIZE", 300),
            metrics_enabled: parse_flag("METRICS_ENABLED", true),
        }
    }

    /// Checks settings that only matter for the selected backend.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repository_storage_type == RepositoryStorageType::Redis {
            if self.redis_url.trim().is_empty() {
                return Err(ConfigError::MissingSetting("REDIS_URL".to_string()));
            }
            if self.redis_key_prefix.trim().is_empty() {
                return Err(ConfigError::MissingSetting("REDIS_KEY_PREFIX".to_string()));
            }
        }
        Ok(())
    }
}

fn parse_env<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}
