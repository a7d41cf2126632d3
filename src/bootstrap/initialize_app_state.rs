//! Application state initialization
//!
//! Chooses the record backend from the server configuration, optionally
//! clears stored records, and builds the state shared by all workers.
use crate::{
    config::{RepositoryStorageType, ServerConfig},
    models::{AppState, CatRepoModel, DefaultAppState, DogRepoModel},
    repositories::{RecordRepositoryStorage, Repository},
    utils::initialize_redis_connection,
};
use actix_web::web;
use color_eyre::Result;
use log::{info, warn};
use std::sync::Arc;

pub struct RepositoryCollection {
    pub cat: Arc<RecordRepositoryStorage<CatRepoModel>>,
    pub dog: Arc<RecordRepositoryStorage<DogRepoModel>>,
}

/// Initializes repositories based on the server configuration
///
/// # Errors
///
/// Returns an error when the Redis backend is selected and the connection
/// cannot be established in time, or the key prefix is empty.
pub async fn initialize_repositories(config: &ServerConfig) -> Result<RepositoryCollection> {
    let repositories = match config.repository_storage_type {
        RepositoryStorageType::InMemory => RepositoryCollection {
            cat: Arc::new(RecordRepositoryStorage::new_in_memory()),
            dog: Arc::new(RecordRepositoryStorage::new_in_memory()),
        },
        RepositoryStorageType::Redis => {
            let connection_manager = initialize_redis_connection(config).await?;

            RepositoryCollection {
                cat: Arc::new(RecordRepositoryStorage::new_redis(
                    connection_manager.clone(),
                    config.redis_key_prefix.clone(),
                )?),
                dog: Arc::new(RecordRepositoryStorage::new_redis(
                    connection_manager,
                    config.redis_key_prefix.clone(),
                )?),
            }
        }
    };

    info!(
        "Record repositories initialized (storage: {})",
        config.repository_storage_type
    );

    if config.reset_storage_on_start {
        warn!("RESET_STORAGE_ON_START is set, dropping all stored records");
        repositories.cat.drop_all_entries().await?;
        repositories.dog.drop_all_entries().await?;
    }

    Ok(repositories)
}

/// Initializes application state
///
/// # Errors
///
/// Returns error if repository initialization fails.
pub async fn initialize_app_state(
    server_config: Arc<ServerConfig>,
) -> Result<web::ThinData<DefaultAppState>> {
    let repositories = initialize_repositories(&server_config).await?;

    Ok(web::ThinData(AppState::new(
        repositories.cat,
        repositories.dog,
    )))
}
