//! Tracks the most recently created cat and dog.
//!
//! Each slot starts out as a placeholder record and is replaced by the create
//! handlers. Slots are guarded independently.

use tokio::sync::{RwLock, RwLockWriteGuard};

use crate::models::{CatRepoModel, DogRepoModel};

#[derive(Debug)]
pub struct LastAdded {
    cat: RwLock<CatRepoModel>,
    dog: RwLock<DogRepoModel>,
}

impl LastAdded {
    pub fn new() -> Self {
        Self {
            cat: RwLock::new(CatRepoModel::placeholder()),
            dog: RwLock::new(DogRepoModel::placeholder()),
        }
    }

    pub async fn cat(&self) -> CatRepoModel {
        self.cat.read().await.clone()
    }

    pub async fn dog(&self) -> DogRepoModel {
        self.dog.read().await.clone()
    }

    pub async fn set_cat(&self, cat: CatRepoModel) {
        *self.cat.write().await = cat;
    }

    pub async fn set_dog(&self, dog: DogRepoModel) {
        *self.dog.write().await = dog;
    }

    /// Exclusive access to the cat slot for read-modify-write sequences.
    pub async fn cat_mut(&self) -> RwLockWriteGuard<'_, CatRepoModel> {
        self.cat.write().await
    }

    /// Exclusive access to the dog slot for read-modify-write sequences.
    pub async fn dog_mut(&self) -> RwLockWriteGuard<'_, DogRepoModel> {
        self.dog.write().await
    }
}

impl Default for LastAdded {
    fn default() -> Self {
        Self::new()
    }
}
