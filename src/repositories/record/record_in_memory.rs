//! This module defines an in-memory record repository. Records are kept in a
//! `Mutex`-protected `HashMap` keyed by id; name lookups and uniqueness checks
//! scan the stored values, which is fine for the sizes this backend is meant
//! for (tests and local runs).

use crate::{
    models::{Record, RepositoryError},
    repositories::*,
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::{Mutex, MutexGuard};

#[derive(Debug)]
pub struct InMemoryRecordRepository<T: Record> {
    store: Mutex<HashMap<String, T>>,
}

impl<T: Record> InMemoryRecordRepository<T> {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(HashMap::new()),
        }
    }

    async fn acquire_lock<V>(lock: &Mutex<V>) -> Result<MutexGuard<V>, RepositoryError> {
        Ok(lock.lock().await)
    }

    fn duplicate_name_error(name: &str) -> RepositoryError {
        RepositoryError::ConstraintViolation(format!(
            "E11000 duplicate key error: {} with name '{}' already exists",
            T::ENTITY,
            name
        ))
    }

    fn name_taken_by_other(store: &HashMap<String, T>, entity: &T) -> bool {
        T::UNIQUE_NAME
            && store
                .values()
                .any(|existing| existing.name() == entity.name() && existing.id() != entity.id())
    }
}

impl<T: Record> Default for InMemoryRecordRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> Repository<T, String> for InMemoryRecordRepository<T> {
    async fn create(&self, entity: T) -> Result<T, RepositoryError> {
        entity.validate()?;

        let mut store = Self::acquire_lock(&self.store).await?;
        if store.contains_key(entity.id()) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "{} with ID '{}' already exists",
                T::ENTITY,
                entity.id()
            )));
        }
        if Self::name_taken_by_other(&store, &entity) {
            return Err(Self::duplicate_name_error(entity.name()));
        }

        store.insert(entity.id().to_string(), entity.clone());
        Ok(entity)
    }

    async fn get_by_id(&self, id: String) -> Result<T, RepositoryError> {
        let store = Self::acquire_lock(&self.store).await?;
        match store.get(&id) {
            Some(entity) => Ok(entity.clone()),
            None => Err(RepositoryError::NotFound(format!(
                "{} with ID '{}' not found",
                T::ENTITY,
                id
            ))),
        }
    }

    async fn list_all(&self) -> Result<Vec<T>, RepositoryError> {
        let store = Self::acquire_lock(&self.store).await?;
        let mut records: Vec<T> = store.values().cloned().collect();
        records.sort_by_key(|record| record.created_date());
        Ok(records)
    }

    async fn update(&self, id: String, entity: T) -> Result<T, RepositoryError> {
        entity.validate()?;

        let mut store = Self::acquire_lock(&self.store).await?;
        if !store.contains_key(&id) {
            return Err(RepositoryError::NotFound(format!(
                "{} with ID '{}' not found",
                T::ENTITY,
                id
            )));
        }

        if id != entity.id() {
            return Err(RepositoryError::InvalidData(format!(
                "ID mismatch: parameter '{}' does not match entity ID '{}'",
                id,
                entity.id()
            )));
        }

        if Self::name_taken_by_other(&store, &entity) {
            return Err(Self::duplicate_name_error(entity.name()));
        }

        store.insert(id, entity.clone());
        Ok(entity)
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        let store = Self::acquire_lock(&self.store).await?;
        Ok(store.len())
    }

    async fn has_entries(&self) -> Result<bool, RepositoryError> {
        let store = Self::acquire_lock(&self.store).await?;
        Ok(!store.is_empty())
    }

    async fn drop_all_entries(&self) -> Result<(), RepositoryError> {
        let mut store = Self::acquire_lock(&self.store).await?;
        store.clear();
        Ok(())
    }
}

#[async_trait]
impl<T: Record> RecordRepository<T> for InMemoryRecordRepository<T> {
    async fn find_by_name(&self, name: &str) -> Result<Option<T>, RepositoryError> {
        let store = Self::acquire_lock(&self.store).await?;
        Ok(store
            .values()
            .filter(|record| record.name() == name)
            .min_by_key(|record| record.created_date())
            .cloned())
    }
}
