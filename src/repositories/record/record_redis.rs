//! Redis-backed implementation of the record repository.
//!
//! Key layout, for a record type `{entity}` under `{prefix}`:
//!
//! - `{prefix}:{entity}:{id}` JSON document
//! - `{prefix}:{entity}_list` set of all ids
//! - `{prefix}:{entity}_name_index` hash name -> id, for unique-name types
//! - `{prefix}:{entity}_name:{name}` set of ids, for non-unique types
//!
//! Unique names are claimed with `HSETNX` before the document is written, so
//! two concurrent creates of the same cat cannot both succeed.

use crate::models::{Record, RepositoryError};
use crate::repositories::redis_base::RedisRepository;
use crate::repositories::{RecordRepository, Repository};
use async_trait::async_trait;
use log::{debug, error, warn};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

pub struct RedisRecordRepository<T: Record> {
    pub client: Arc<ConnectionManager>,
    pub key_prefix: String,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> Clone for RedisRecordRepository<T> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            key_prefix: self.key_prefix.clone(),
            _record: PhantomData,
        }
    }
}

impl<T: Record> RedisRepository for RedisRecordRepository<T> {}

impl<T: Record> RedisRecordRepository<T> {
    pub fn new(
        connection_manager: Arc<ConnectionManager>,
        key_prefix: String,
    ) -> Result<Self, RepositoryError> {
        if key_prefix.is_empty() {
            return Err(RepositoryError::InvalidData(
                "Redis key prefix cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            client: connection_manager,
            key_prefix,
            _record: PhantomData,
        })
    }

    fn record_key(&self, id: &str) -> String {
        record_key(&self.key_prefix, T::ENTITY, id)
    }

    fn list_key(&self) -> String {
        list_key(&self.key_prefix, T::ENTITY)
    }

    fn name_index_key(&self) -> String {
        name_index_key(&self.key_prefix, T::ENTITY)
    }

    fn name_set_key(&self, name: &str) -> String {
        name_set_key(&self.key_prefix, T::ENTITY, name)
    }

    fn duplicate_name_error(name: &str) -> RepositoryError {
        RepositoryError::ConstraintViolation(format!(
            "E11000 duplicate key error: {} with name '{}' already exists",
            T::ENTITY,
            name
        ))
    }

    /// Batch fetch records by ids, skipping ids whose document vanished.
    async fn get_records_by_ids(&self, ids: &[String]) -> Result<Vec<T>, RepositoryError> {
        if ids.is_empty() {
            debug!("No {} IDs provided for batch fetch", T::ENTITY);
            return Ok(vec![]);
        }

        let mut conn = self.client.as_ref().clone();
        let keys: Vec<String> = ids.iter().map(|id| self.record_key(id)).collect();

        let values: Vec<Option<String>> = conn
            .mget(&keys)
            .await
            .map_err(|e| self.map_redis_error(e, &format!("batch_fetch_{}s", T::ENTITY)))?;

        let mut records = Vec::with_capacity(values.len());
        for (id, value) in ids.iter().zip(values) {
            match value {
                Some(json) => match self.deserialize_entity::<T>(&json, id, T::ENTITY) {
                    Ok(record) => records.push(record),
                    Err(e) => error!("Skipping unreadable {} {}: {}", T::ENTITY, id, e),
                },
                None => warn!("{} {} listed but has no document", T::ENTITY, id),
            }
        }

        records.sort_by_key(|record| record.created_date());
        Ok(records)
    }

    async fn fetch_document(&self, id: &str, context: &str) -> Result<Option<T>, RepositoryError> {
        let mut conn = self.client.as_ref().clone();
        let value: Option<String> = conn
            .get(self.record_key(id))
            .await
            .map_err(|e| self.map_redis_error(e, context))?;

        value
            .map(|json| self.deserialize_entity::<T>(&json, id, T::ENTITY))
            .transpose()
    }

    /// Claims `name` for `id` in the unique name index.
    async fn claim_name(&self, name: &str, id: &str) -> Result<(), RepositoryError> {
        let mut conn = self.client.as_ref().clone();
        let claimed: bool = conn
            .hset_nx(self.name_index_key(), name, id)
            .await
            .map_err(|e| self.map_redis_error(e, &format!("claim_{}_name", T::ENTITY)))?;

        if claimed {
            return Ok(());
        }

        // A claim left behind by this same record is still ours.
        let owner: Option<String> = conn
            .hget(self.name_index_key(), name)
            .await
            .map_err(|e| self.map_redis_error(e, &format!("claim_{}_name_owner", T::ENTITY)))?;
        if owner.as_deref() == Some(id) {
            Ok(())
        } else {
            Err(Self::duplicate_name_error(name))
        }
    }

    async fn release_name(&self, name: &str) {
        let mut conn = self.client.as_ref().clone();
        let released: Result<(), _> = conn.hdel(self.name_index_key(), name).await;
        if let Err(e) = released {
            warn!("Failed to release {} name '{}': {}", T::ENTITY, name, e);
        }
    }
}

impl<T: Record> fmt::Debug for RedisRecordRepository<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisRecordRepository")
            .field("entity", &T::ENTITY)
            .field("client", &"<ConnectionManager>")
            .field("key_prefix", &self.key_prefix)
            .finish()
    }
}

#[async_trait]
impl<T: Record> Repository<T, String> for RedisRecordRepository<T> {
    async fn create(&self, entity: T) -> Result<T, RepositoryError> {
        if entity.id().is_empty() {
            return Err(RepositoryError::InvalidData(format!(
                "{} ID cannot be empty",
                T::ENTITY
            )));
        }
        entity.validate()?;

        let id = entity.id().to_string();
        let key = self.record_key(&id);
        let value = self.serialize_entity(&entity, &id, T::ENTITY)?;
        let mut conn = self.client.as_ref().clone();

        debug!("Creating {} with ID: {}", T::ENTITY, id);

        let existing: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| self.map_redis_error(e, &format!("create_{}_check", T::ENTITY)))?;
        if existing.is_some() {
            return Err(RepositoryError::ConstraintViolation(format!(
                "{} with ID '{}' already exists",
                T::ENTITY,
                id
            )));
        }

        if T::UNIQUE_NAME {
            self.claim_name(entity.name(), &id).await?;
        }

        let mut pipe = redis::pipe();
        pipe.atomic();
        pipe.set(&key, &value);
        pipe.sadd(self.list_key(), &id);
        if !T::UNIQUE_NAME {
            pipe.sadd(self.name_set_key(entity.name()), &id);
        }

        if let Err(e) = pipe.query_async::<()>(&mut conn).await {
            if T::UNIQUE_NAME {
                self.release_name(entity.name()).await;
            }
            return Err(self.map_redis_error(e, &format!("create_{}", T::ENTITY)));
        }

        debug!("Successfully created {} {}", T::ENTITY, id);
        Ok(entity)
    }

    async fn get_by_id(&self, id: String) -> Result<T, RepositoryError> {
        if id.is_empty() {
            return Err(RepositoryError::InvalidData(format!(
                "{} ID cannot be empty",
                T::ENTITY
            )));
        }

        debug!("Fetching {} with ID: {}", T::ENTITY, id);

        match self
            .fetch_document(&id, &format!("get_{}_by_id", T::ENTITY))
            .await?
        {
            Some(record) => Ok(record),
            None => {
                debug!("{} {} not found", T::ENTITY, id);
                Err(RepositoryError::NotFound(format!(
                    "{} with ID '{}' not found",
                    T::ENTITY,
                    id
                )))
            }
        }
    }

    async fn list_all(&self) -> Result<Vec<T>, RepositoryError> {
        let mut conn = self.client.as_ref().clone();

        let ids: Vec<String> = conn
            .smembers(self.list_key())
            .await
            .map_err(|e| self.map_redis_error(e, &format!("list_all_{}_ids", T::ENTITY)))?;

        debug!("Found {} {} IDs", ids.len(), T::ENTITY);
        self.get_records_by_ids(&ids).await
    }

    async fn update(&self, id: String, entity: T) -> Result<T, RepositoryError> {
        if id.is_empty() {
            return Err(RepositoryError::InvalidData(format!(
                "{} ID cannot be empty",
                T::ENTITY
            )));
        }
        if id != entity.id() {
            return Err(RepositoryError::InvalidData(format!(
                "ID mismatch: parameter '{}' does not match entity ID '{}'",
                id,
                entity.id()
            )));
        }
        entity.validate()?;

        debug!("Updating {} with ID: {}", T::ENTITY, id);

        let existing = self
            .fetch_document(&id, &format!("update_{}_check", T::ENTITY))
            .await?
            .ok_or_else(|| {
                RepositoryError::NotFound(format!("{} with ID '{}' not found", T::ENTITY, id))
            })?;

        let renamed = existing.name() != entity.name();
        if renamed && T::UNIQUE_NAME {
            self.claim_name(entity.name(), &id).await?;
        }

        let value = self.serialize_entity(&entity, &id, T::ENTITY)?;
        let mut conn = self.client.as_ref().clone();

        let mut pipe = redis::pipe();
        pipe.atomic();
        pipe.set(self.record_key(&id), &value);
        if renamed {
            if T::UNIQUE_NAME {
                pipe.hdel(self.name_index_key(), existing.name());
            } else {
                pipe.srem(self.name_set_key(existing.name()), &id);
                pipe.sadd(self.name_set_key(entity.name()), &id);
            }
        }

        pipe.query_async::<()>(&mut conn)
            .await
            .map_err(|e| self.map_redis_error(e, &format!("update_{}", T::ENTITY)))?;

        debug!("Successfully updated {} {}", T::ENTITY, id);
        Ok(entity)
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        let mut conn = self.client.as_ref().clone();

        let count: u64 = conn
            .scard(self.list_key())
            .await
            .map_err(|e| self.map_redis_error(e, &format!("count_{}s", T::ENTITY)))?;

        Ok(count as usize)
    }

    async fn has_entries(&self) -> Result<bool, RepositoryError> {
        let mut conn = self.client.as_ref().clone();

        let exists: bool = conn
            .exists(self.list_key())
            .await
            .map_err(|e| self.map_redis_error(e, &format!("has_{}_entries", T::ENTITY)))?;

        Ok(exists)
    }

    async fn drop_all_entries(&self) -> Result<(), RepositoryError> {
        let records = self.list_all().await?;
        let mut conn = self.client.as_ref().clone();

        debug!("Dropping {} {} entries", records.len(), T::ENTITY);

        let mut pipe = redis::pipe();
        pipe.atomic();
        for record in &records {
            pipe.del(self.record_key(record.id()));
            if !T::UNIQUE_NAME {
                pipe.del(self.name_set_key(record.name()));
            }
        }
        pipe.del(self.list_key());
        pipe.del(self.name_index_key());

        pipe.query_async::<()>(&mut conn)
            .await
            .map_err(|e| self.map_redis_error(e, &format!("drop_all_{}_entries", T::ENTITY)))?;

        debug!("Dropped all {} entries", T::ENTITY);
        Ok(())
    }
}

#[async_trait]
impl<T: Record> RecordRepository<T> for RedisRecordRepository<T> {
    async fn find_by_name(&self, name: &str) -> Result<Option<T>, RepositoryError> {
        let mut conn = self.client.as_ref().clone();

        debug!("Looking up {} by name '{}'", T::ENTITY, name);

        if T::UNIQUE_NAME {
            let id: Option<String> = conn
                .hget(self.name_index_key(), name)
                .await
                .map_err(|e| self.map_redis_error(e, &format!("find_{}_by_name", T::ENTITY)))?;

            return match id {
                Some(id) => {
                    self.fetch_document(&id, &format!("find_{}_by_name", T::ENTITY))
                        .await
                }
                None => Ok(None),
            };
        }

        let ids: Vec<String> = conn
            .smembers(self.name_set_key(name))
            .await
            .map_err(|e| self.map_redis_error(e, &format!("find_{}_by_name", T::ENTITY)))?;

        let records = self.get_records_by_ids(&ids).await?;
        Ok(records.into_iter().next())
    }
}

fn record_key(prefix: &str, entity: &str, id: &str) -> String {
    format!("{}:{}:{}", prefix, entity, id)
}

fn list_key(prefix: &str, entity: &str) -> String {
    format!("{}:{}_list", prefix, entity)
}

fn name_index_key(prefix: &str, entity: &str) -> String {
    format!("{}:{}_name_index", prefix, entity)
}

fn name_set_key(prefix: &str, entity: &str, name: &str) -> String {
    format!("{}:{}_name:{}", prefix, entity, name)
}
