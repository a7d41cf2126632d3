use std::sync::Arc;
use std::time::Duration;

use color_eyre::Result;
use log::info;
use redis::aio::ConnectionManager;
use tokio::time::timeout;

use crate::config::ServerConfig;

/// Opens the Redis connection manager shared by the record repositories.
///
/// Fails when the server does not answer within
/// `REDIS_CONNECTION_TIMEOUT_MS`.
pub async fn initialize_redis_connection(config: &ServerConfig) -> Result<Arc<ConnectionManager>> {
    let redis_client = redis::Client::open(config.redis_url.as_str())?;
    let connection_manager = timeout(
        Duration::from_millis(config.redis_connection_timeout_ms),
        ConnectionManager::new(redis_client),
    )
    .await
    .map_err(|_| {
        eyre::eyre!(
            "Redis connection timeout after {}ms",
            config.redis_connection_timeout_ms
        )
    })??;

    info!("Connected to Redis at {}", config.redis_url);
    Ok(Arc::new(connection_manager))
}
