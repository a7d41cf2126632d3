//! # Dogs Controller
//!
//! Dog counterparts of the cat endpoints. Dog names are not unique; lookups
//! return the oldest dog with the requested name.

use crate::{
    models::{
        ApiError, CatRepoModel, CreateDogRequest, DogRepoModel, DogSummary, ErrorMessage,
        NameQuery, NameResponse, RepositoryError, ThinDataAppState, DOG_FIELDS_REQUIRED,
    },
    repositories::RecordRepository,
};

use actix_web::HttpResponse;
use log::info;

pub const NO_DOGS_FOUND: &str = "No dogs found";

pub async fn list_dogs<CR, DR>(state: ThinDataAppState<CR, DR>) -> Result<HttpResponse, ApiError>
where
    CR: RecordRepository<CatRepoModel> + 'static,
    DR: RecordRepository<DogRepoModel> + 'static,
{
    let dogs = state.dog_repository.list_all().await?;
    Ok(HttpResponse::Ok().json(dogs))
}

pub async fn get_dog_by_name<CR, DR>(
    query: NameQuery,
    state: ThinDataAppState<CR, DR>,
) -> Result<HttpResponse, ApiError>
where
    CR: RecordRepository<CatRepoModel> + 'static,
    DR: RecordRepository<DogRepoModel> + 'static,
{
    let dog = match query.name {
        Some(name) => state.dog_repository.find_by_name(&name).await?,
        None => None,
    };
    Ok(HttpResponse::Ok().json(dog))
}

pub async fn last_dog_name<CR, DR>(
    state: ThinDataAppState<CR, DR>,
) -> Result<HttpResponse, ApiError>
where
    CR: RecordRepository<CatRepoModel> + 'static,
    DR: RecordRepository<DogRepoModel> + 'static,
{
    let dog = state.last_added.dog().await;
    Ok(HttpResponse::Ok().json(NameResponse { name: dog.name }))
}

/// Searches for a dog by name and reports the matching document.
pub async fn search_dog<CR, DR>(
    query: NameQuery,
    state: ThinDataAppState<CR, DR>,
) -> Result<HttpResponse, ApiError>
where
    CR: RecordRepository<CatRepoModel> + 'static,
    DR: RecordRepository<DogRepoModel> + 'static,
{
    let found = match query.name {
        Some(name) => state.dog_repository.find_by_name(&name).await?,
        None => None,
    };

    match found {
        Some(dog) => Ok(HttpResponse::Ok().json(DogSummary::from(&dog))),
        None => Ok(HttpResponse::Ok().json(ErrorMessage::new(NO_DOGS_FOUND))),
    }
}

pub async fn create_dog<CR, DR>(
    request: CreateDogRequest,
    state: ThinDataAppState<CR, DR>,
) -> Result<HttpResponse, ApiError>
where
    CR: RecordRepository<CatRepoModel> + 'static,
    DR: RecordRepository<DogRepoModel> + 'static,
{
    if !request.has_required_fields() {
        return Err(ApiError::BadRequest(DOG_FIELDS_REQUIRED.to_string()));
    }

    let dog = DogRepoModel::try_from(request)?;
    let dog = state.dog_repository.create(dog).await?;
    info!("Created dog '{}' ({})", dog.name, dog.id);

    let summary = DogSummary::from(&dog);
    state.last_added.set_dog(dog).await;

    Ok(HttpResponse::Ok().json(summary))
}

/// Ages the last added dog by one year and saves it.
pub async fn increment_last_dog<CR, DR>(
    state: ThinDataAppState<CR, DR>,
) -> Result<HttpResponse, ApiError>
where
    CR: RecordRepository<CatRepoModel> + 'static,
    DR: RecordRepository<DogRepoModel> + 'static,
{
    let mut tracked = state.last_added.dog_mut().await;

    let mut dog = tracked.clone();
    dog.age = dog.age.checked_add(1).ok_or_else(|| {
        RepositoryError::InvalidData(format!(
            "Dog validation failed: age: cannot age a dog past {}",
            dog.age
        ))
    })?;
    let saved = state.dog_repository.save(dog).await?;

    *tracked = saved;
    Ok(HttpResponse::Ok().json(DogSummary::from(&*tracked)))
}
