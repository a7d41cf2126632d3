use std::sync::Arc;

use actix_web::web::ThinData;

use crate::{
    models::{CatRepoModel, DogRepoModel, LastAdded},
    repositories::{RecordRepository, RecordRepositoryStorage},
};

/// Shared state handed to every controller.
pub struct AppState<CR, DR> {
    pub cat_repository: Arc<CR>,
    pub dog_repository: Arc<DR>,
    pub last_added: Arc<LastAdded>,
}

impl<CR, DR> Clone for AppState<CR, DR> {
    fn clone(&self) -> Self {
        Self {
            cat_repository: Arc::clone(&self.cat_repository),
            dog_repository: Arc::clone(&self.dog_repository),
            last_added: Arc::clone(&self.last_added),
        }
    }
}

impl<CR, DR> AppState<CR, DR>
where
    CR: RecordRepository<CatRepoModel>,
    DR: RecordRepository<DogRepoModel>,
{
    pub fn new(cat_repository: Arc<CR>, dog_repository: Arc<DR>) -> Self {
        Self {
            cat_repository,
            dog_repository,
            last_added: Arc::new(LastAdded::new()),
        }
    }

    pub fn cat_repository(&self) -> Arc<CR> {
        Arc::clone(&self.cat_repository)
    }

    pub fn dog_repository(&self) -> Arc<DR> {
        Arc::clone(&self.dog_repository)
    }
}

pub type DefaultAppState =
    AppState<RecordRepositoryStorage<CatRepoModel>, RecordRepositoryStorage<DogRepoModel>>;

pub type ThinDataAppState<CR, DR> = ThinData<AppState<CR, DR>>;
