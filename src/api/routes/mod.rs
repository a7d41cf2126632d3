//! # API Routes Module
//!
//! Configures HTTP routes for the pet records service.
//!
//! ## Routes
//!
//! * `/health` - Health check endpoint
//! * `/`, `/page1` .. `/page4` - HTML pages
//! * `/cat`, `/cats`, `/cat/...` - Cat endpoints
//! * `/dog`, `/dogs`, `/dog/...` - Dog endpoints
//! * `/metrics`, `/debug/metrics/scrape` - Metrics, registered separately

pub mod cat;
pub mod dog;
pub mod health;
pub mod metrics;
pub mod pages;

use crate::api::controllers::pages as pages_controller;
use actix_web::{
    web::{self, Form, Json},
    Either, HttpRequest, HttpResponse,
};
use serde::de::DeserializeOwned;

/// Request body accepted as JSON or as an url-encoded form.
///
/// An absent or unreadable body is treated as an empty request so the
/// controllers answer with their usual "required fields" message.
pub type JsonOrForm<T> = Option<Either<Json<T>, Form<T>>>;

pub fn body_or_default<T>(body: JsonOrForm<T>) -> T
where
    T: DeserializeOwned + Default,
{
    match body {
        Some(Either::Left(json)) => json.into_inner(),
        Some(Either::Right(form)) => form.into_inner(),
        None => T::default(),
    }
}

/// Fallback for unmatched routes.
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    pages_controller::not_found(&req.uri().to_string())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::init)
        .configure(pages::init)
        .configure(cat::init)
        .configure(dog::init);
}
