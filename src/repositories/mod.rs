//! # Repository Module
//!
//! Implements the record store for cats and dogs using the Repository pattern,
//! with an in-memory backend and a Redis-backed document store.

use crate::models::RepositoryError;
use async_trait::async_trait;

mod record;
pub use record::*;

mod redis_base;

#[async_trait]
pub trait Repository<T, ID> {
    async fn create(&self, entity: T) -> Result<T, RepositoryError>;
    async fn get_by_id(&self, id: ID) -> Result<T, RepositoryError>;
    async fn list_all(&self) -> Result<Vec<T>, RepositoryError>;
    async fn update(&self, id: ID, entity: T) -> Result<T, RepositoryError>;
    async fn count(&self) -> Result<usize, RepositoryError>;

    /// Check if the repository contains any entries.
    async fn has_entries(&self) -> Result<bool, RepositoryError>;

    /// Drop all entries from storage.
    /// This completely clears all data, indexes, and metadata.
    /// Use with caution as this permanently deletes all data.
    async fn drop_all_entries(&self) -> Result<(), RepositoryError>;
}
