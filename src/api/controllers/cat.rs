//! # Cats Controller
//!
//! Handles the cat endpoints:
//! - Listing cats and looking one up by name
//! - Searching by name
//! - Creating a cat and tracking it as the last one added
//! - Incrementing the beds of the last added cat

use crate::{
    models::{
        ApiError, CatRepoModel, CatSummary, CreateCatRequest, DogRepoModel, ErrorMessage,
        NameQuery, NameResponse, RepositoryError, ThinDataAppState, CAT_FIELDS_REQUIRED,
    },
    repositories::RecordRepository,
};

use actix_web::HttpResponse;
use log::{debug, info};
use serde_json::json;

pub const NAME_REQUIRED_FOR_SEARCH: &str = "Name is required to perform a search";

/// Lists every stored cat document.
pub async fn list_cats<CR, DR>(state: ThinDataAppState<CR, DR>) -> Result<HttpResponse, ApiError>
where
    CR: RecordRepository<CatRepoModel> + 'static,
    DR: RecordRepository<DogRepoModel> + 'static,
{
    let cats = state.cat_repository.list_all().await?;
    Ok(HttpResponse::Ok().json(cats))
}

/// Returns the cat document with the given name, or `null`.
pub async fn get_cat_by_name<CR, DR>(
    query: NameQuery,
    state: ThinDataAppState<CR, DR>,
) -> Result<HttpResponse, ApiError>
where
    CR: RecordRepository<CatRepoModel> + 'static,
    DR: RecordRepository<DogRepoModel> + 'static,
{
    let cat = match query.name {
        Some(name) => state.cat_repository.find_by_name(&name).await?,
        None => None,
    };
    Ok(HttpResponse::Ok().json(cat))
}

/// Name of the last added cat.
pub async fn last_cat_name<CR, DR>(
    state: ThinDataAppState<CR, DR>,
) -> Result<HttpResponse, ApiError>
where
    CR: RecordRepository<CatRepoModel> + 'static,
    DR: RecordRepository<DogRepoModel> + 'static,
{
    let cat = state.last_added.cat().await;
    Ok(HttpResponse::Ok().json(NameResponse { name: cat.name }))
}

/// Searches for a cat by name.
///
/// A missing name is answered with `200` and an `error` message; no match is
/// answered with an empty object.
pub async fn search_cat<CR, DR>(
    query: NameQuery,
    state: ThinDataAppState<CR, DR>,
) -> Result<HttpResponse, ApiError>
where
    CR: RecordRepository<CatRepoModel> + 'static,
    DR: RecordRepository<DogRepoModel> + 'static,
{
    let name = match query.name.filter(|name| !name.is_empty()) {
        Some(name) => name,
        None => return Ok(HttpResponse::Ok().json(ErrorMessage::new(NAME_REQUIRED_FOR_SEARCH))),
    };

    match state.cat_repository.find_by_name(&name).await? {
        Some(cat) => Ok(HttpResponse::Ok().json(CatSummary::from(&cat))),
        None => {
            debug!("No cat named '{}'", name);
            Ok(HttpResponse::Ok().json(json!({})))
        }
    }
}

/// Creates a cat named `"{firstname} {lastname}"` and makes it the last added
/// cat.
pub async fn create_cat<CR, DR>(
    request: CreateCatRequest,
    state: ThinDataAppState<CR, DR>,
) -> Result<HttpResponse, ApiError>
where
    CR: RecordRepository<CatRepoModel> + 'static,
    DR: RecordRepository<DogRepoModel> + 'static,
{
    if !request.has_required_fields() {
        return Err(ApiError::BadRequest(CAT_FIELDS_REQUIRED.to_string()));
    }

    let cat = CatRepoModel::try_from(request)?;
    let cat = state.cat_repository.create(cat).await?;
    info!("Created cat '{}' ({})", cat.name, cat.id);

    let summary = CatSummary::from(&cat);
    state.last_added.set_cat(cat).await;

    Ok(HttpResponse::Ok().json(summary))
}

/// Adds one bed to the last added cat and saves it.
///
/// The tracker keeps its previous value when the save fails.
pub async fn increment_last_cat<CR, DR>(
    state: ThinDataAppState<CR, DR>,
) -> Result<HttpResponse, ApiError>
where
    CR: RecordRepository<CatRepoModel> + 'static,
    DR: RecordRepository<DogRepoModel> + 'static,
{
    let mut tracked = state.last_added.cat_mut().await;

    let mut cat = tracked.clone();
    cat.beds_owned = cat.beds_owned.checked_add(1).ok_or_else(|| {
        RepositoryError::InvalidData(format!(
            "Cat validation failed: bedsOwned: cannot add a bed to {} beds",
            cat.beds_owned
        ))
    })?;
    let saved = state.cat_repository.save(cat).await?;

    *tracked = saved;
    Ok(HttpResponse::Ok().json(CatSummary::from(&*tracked)))
}
