//! # Pages Controller
//!
//! Renders the HTML pages. Listing pages fall back to the JSON store error
//! payload when the store fails.

use crate::{
    api::views,
    models::{ApiError, CatRepoModel, DogRepoModel, ThinDataAppState},
    repositories::RecordRepository,
};

use actix_web::{http::header::ContentType, HttpResponse};

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

pub async fn home<CR, DR>(state: ThinDataAppState<CR, DR>) -> Result<HttpResponse, ApiError>
where
    CR: RecordRepository<CatRepoModel> + 'static,
    DR: RecordRepository<DogRepoModel> + 'static,
{
    let cat = state.last_added.cat().await;
    Ok(html(views::index_page("Home", "Home Page", &cat.name)))
}

pub async fn cats_page<CR, DR>(state: ThinDataAppState<CR, DR>) -> Result<HttpResponse, ApiError>
where
    CR: RecordRepository<CatRepoModel> + 'static,
    DR: RecordRepository<DogRepoModel> + 'static,
{
    let cats = state.cat_repository.list_all().await?;
    Ok(html(views::cats_page(&cats)))
}

pub async fn create_cat_page() -> Result<HttpResponse, ApiError> {
    Ok(html(views::create_cat_page()))
}

pub async fn search_page() -> Result<HttpResponse, ApiError> {
    Ok(html(views::search_page()))
}

pub async fn dogs_page<CR, DR>(state: ThinDataAppState<CR, DR>) -> Result<HttpResponse, ApiError>
where
    CR: RecordRepository<CatRepoModel> + 'static,
    DR: RecordRepository<DogRepoModel> + 'static,
{
    let dogs = state.dog_repository.list_all().await?;
    Ok(html(views::dogs_page(&dogs)))
}

/// 404 page for any route without a handler. `page` is the request path with
/// its query string.
pub fn not_found(page: &str) -> HttpResponse {
    HttpResponse::NotFound()
        .content_type(ContentType::html())
        .body(views::not_found_page(page))
}
