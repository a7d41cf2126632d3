//! Base Redis repository functionality shared by the Redis-backed stores.
//!
//! Documents are stored as JSON strings; this module centralises the
//! (de)serialization and the translation of Redis failures into
//! [`RepositoryError`]s.

use crate::models::RepositoryError;
use log::{error, warn};
use redis::RedisError;
use serde::{Deserialize, Serialize};

pub trait RedisRepository {
    fn serialize_entity<T>(
        &self,
        entity: &T,
        entity_id: &str,
        entity_type: &str,
    ) -> Result<String, RepositoryError>
    where
        T: Serialize,
    {
        serde_json::to_string(entity).map_err(|e| {
            error!("Serialization failed for {} {}: {}", entity_type, entity_id, e);
            RepositoryError::InvalidData(format!(
                "Failed to serialize {} {}: {}",
                entity_type, entity_id, e
            ))
        })
    }

    fn deserialize_entity<T>(
        &self,
        json: &str,
        entity_id: &str,
        entity_type: &str,
    ) -> Result<T, RepositoryError>
    where
        T: for<'de> Deserialize<'de>,
    {
        serde_json::from_str(json).map_err(|e| {
            error!(
                "Deserialization failed for {} {}: {}",
                entity_type, entity_id, e
            );
            RepositoryError::InvalidData(format!(
                "Failed to deserialize {} {}: {} (JSON length: {})",
                entity_type,
                entity_id,
                e,
                json.len()
            ))
        })
    }

    /// Convert Redis errors to the store error taxonomy.
    fn map_redis_error(&self, error: RedisError, context: &str) -> RepositoryError {
        warn!("Redis operation failed in context '{}': {}", context, error);

        if error.is_io_error()
            || error.is_connection_dropped()
            || error.is_connection_refusal()
            || error.is_timeout()
        {
            return RepositoryError::ConnectionError(format!(
                "Redis operation '{}' failed: {}",
                context, error
            ));
        }

        match error.kind() {
            redis::ErrorKind::AuthenticationFailed => {
                RepositoryError::ConnectionError("Redis authentication failed".to_string())
            }
            redis::ErrorKind::TypeError => RepositoryError::InvalidData(format!(
                "Redis data type error in operation '{}': {}",
                context, error
            )),
            redis::ErrorKind::ReadOnly => RepositoryError::Unknown(format!(
                "Redis is read-only in operation '{}': {}",
                context, error
            )),
            redis::ErrorKind::ExecAbortError => RepositoryError::Unknown(format!(
                "Redis transaction aborted in operation '{}': {}",
                context, error
            )),
            redis::ErrorKind::BusyLoadingError => RepositoryError::ConnectionError(format!(
                "Redis is busy in operation '{}': {}",
                context, error
            )),
            _ => RepositoryError::Unknown(format!(
                "Redis operation '{}' failed: {}",
                context, error
            )),
        }
    }
}
