//! Record Repository Module
//!
//! Persistence for cat and dog documents. Both record types share one
//! generic implementation per backend; the per-type schema rules (required
//! fields, unique names) come from the [`Record`] trait.
//!
//! ## Repository Implementations
//!
//! - [`InMemoryRecordRepository`]: `HashMap` storage for tests and development
//! - [`RedisRecordRepository`]: Redis-backed document storage
//!
mod record_in_memory;
mod record_redis;

pub use record_in_memory::*;
pub use record_redis::*;

use crate::{
    metrics::{RECORDS_CREATED, STORE_ERRORS},
    models::{Record, RepositoryError},
    repositories::Repository,
};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use std::sync::Arc;

#[cfg(test)]
use crate::models::{CatRepoModel, DogRepoModel};

/// Record-specific queries on top of the generic [`Repository`] operations.
#[async_trait]
pub trait RecordRepository<T: Record>: Repository<T, String> + Send + Sync {
    /// Returns the first record whose name matches exactly, oldest first.
    /// A missing record is `Ok(None)`, not an error.
    async fn find_by_name(&self, name: &str) -> Result<Option<T>, RepositoryError>;

    /// Inserts the record when its id is unknown, updates it otherwise.
    async fn save(&self, entity: T) -> Result<T, RepositoryError> {
        let id = entity.id().to_string();
        match self.get_by_id(id.clone()).await {
            Ok(_) => self.update(id, entity).await,
            Err(RepositoryError::NotFound(_)) => self.create(entity).await,
            Err(e) => Err(e),
        }
    }
}

/// Enum wrapper for the record repository implementations
#[derive(Debug)]
pub enum RecordRepositoryStorage<T: Record> {
    InMemory(InMemoryRecordRepository<T>),
    Redis(RedisRecordRepository<T>),
}

impl<T: Record> RecordRepositoryStorage<T> {
    pub fn new_in_memory() -> Self {
        Self::InMemory(InMemoryRecordRepository::new())
    }

    pub fn new_redis(
        connection_manager: Arc<ConnectionManager>,
        key_prefix: String,
    ) -> Result<Self, RepositoryError> {
        Ok(Self::Redis(RedisRecordRepository::new(
            connection_manager,
            key_prefix,
        )?))
    }

    fn observe<R>(
        result: Result<R, RepositoryError>,
        operation: &str,
    ) -> Result<R, RepositoryError> {
        if let Err(e) = &result {
            STORE_ERRORS
                .with_label_values(&[T::ENTITY, operation, e.kind()])
                .inc();
        }
        result
    }
}

#[async_trait]
impl<T: Record> Repository<T, String> for RecordRepositoryStorage<T> {
    async fn create(&self, entity: T) -> Result<T, RepositoryError> {
        let result = match self {
            RecordRepositoryStorage::InMemory(repo) => repo.create(entity).await,
            RecordRepositoryStorage::Redis(repo) => repo.create(entity).await,
        };
        if result.is_ok() {
            RECORDS_CREATED.with_label_values(&[T::ENTITY]).inc();
        }
        Self::observe(result, "create")
    }

    async fn get_by_id(&self, id: String) -> Result<T, RepositoryError> {
        match self {
            RecordRepositoryStorage::InMemory(repo) => repo.get_by_id(id).await,
            RecordRepositoryStorage::Redis(repo) => repo.get_by_id(id).await,
        }
    }

    async fn list_all(&self) -> Result<Vec<T>, RepositoryError> {
        let result = match self {
            RecordRepositoryStorage::InMemory(repo) => repo.list_all().await,
            RecordRepositoryStorage::Redis(repo) => repo.list_all().await,
        };
        Self::observe(result, "list_all")
    }

    async fn update(&self, id: String, entity: T) -> Result<T, RepositoryError> {
        let result = match self {
            RecordRepositoryStorage::InMemory(repo) => repo.update(id, entity).await,
            RecordRepositoryStorage::Redis(repo) => repo.update(id, entity).await,
        };
        Self::observe(result, "update")
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        match self {
            RecordRepositoryStorage::InMemory(repo) => repo.count().await,
            RecordRepositoryStorage::Redis(repo) => repo.count().await,
        }
    }

    async fn has_entries(&self) -> Result<bool, RepositoryError> {
        match self {
            RecordRepositoryStorage::InMemory(repo) => repo.has_entries().await,
            RecordRepositoryStorage::Redis(repo) => repo.has_entries().await,
        }
    }

    async fn drop_all_entries(&self) -> Result<(), RepositoryError> {
        match self {
            RecordRepositoryStorage::InMemory(repo) => repo.drop_all_entries().await,
            RecordRepositoryStorage::Redis(repo) => repo.drop_all_entries().await,
        }
    }
}

#[async_trait]
impl<T: Record> RecordRepository<T> for RecordRepositoryStorage<T> {
    async fn find_by_name(&self, name: &str) -> Result<Option<T>, RepositoryError> {
        let result = match self {
            RecordRepositoryStorage::InMemory(repo) => repo.find_by_name(name).await,
            RecordRepositoryStorage::Redis(repo) => repo.find_by_name(name).await,
        };
        Self::observe(result, "find_by_name")
    }

    /// Routed through this wrapper's `create`/`update` so inserts made by
    /// `save` are counted like any other create.
    async fn save(&self, entity: T) -> Result<T, RepositoryError> {
        let id = entity.id().to_string();
        match self.get_by_id(id.clone()).await {
            Ok(_) => self.update(id, entity).await,
            Err(RepositoryError::NotFound(_)) => self.create(entity).await,
            Err(e) => Self::observe(Err(e), "save"),
        }
    }
}

#[cfg(test)]
mockall::mock! {
    pub CatRepository {}

    #[async_trait]
    impl Repository<CatRepoModel, String> for CatRepository {
        async fn create(&self, entity: CatRepoModel) -> Result<CatRepoModel, RepositoryError>;
        async fn get_by_id(&self, id: String) -> Result<CatRepoModel, RepositoryError>;
        async fn list_all(&self) -> Result<Vec<CatRepoModel>, RepositoryError>;
        async fn update(&self, id: String, entity: CatRepoModel) -> Result<CatRepoModel, RepositoryError>;
        async fn count(&self) -> Result<usize, RepositoryError>;
        async fn has_entries(&self) -> Result<bool, RepositoryError>;
        async fn drop_all_entries(&self) -> Result<(), RepositoryError>;
    }

    #[async_trait]
    impl RecordRepository<CatRepoModel> for CatRepository {
        async fn find_by_name(&self, name: &str) -> Result<Option<CatRepoModel>, RepositoryError>;
        async fn save(&self, entity: CatRepoModel) -> Result<CatRepoModel, RepositoryError>;
    }
}

#[cfg(test)]
mockall::mock! {
    pub DogRepository {}

    #[async_trait]
    impl Repository<DogRepoModel, String> for DogRepository {
        async fn create(&self, entity: DogRepoModel) -> Result<DogRepoModel, RepositoryError>;
        async fn get_by_id(&self, id: String) -> Result<DogRepoModel, RepositoryError>;
        async fn list_all(&self) -> Result<Vec<DogRepoModel>, RepositoryError>;
        async fn update(&self, id: String, entity: DogRepoModel) -> Result<DogRepoModel, RepositoryError>;
        async fn count(&self) -> Result<usize, RepositoryError>;
        async fn has_entries(&self) -> Result<bool, RepositoryError>;
        async fn drop_all_entries(&self) -> Result<(), RepositoryError>;
    }

    #[async_trait]
    impl RecordRepository<DogRepoModel> for DogRepository {
        async fn find_by_name(&self, name: &str) -> Result<Option<DogRepoModel>, RepositoryError>;
        async fn save(&self, entity: DogRepoModel) -> Result<DogRepoModel, RepositoryError>;
    }
}
