//! Routes for the cat endpoints.

use crate::{
    api::{
        controllers::cat,
        routes::{body_or_default, JsonOrForm},
    },
    models::{CreateCatRequest, DefaultAppState, NameQuery},
};
use actix_web::{get, post, route, web, Responder};

/// Lists all cats.
#[get("/cats")]
async fn list_cats(data: web::ThinData<DefaultAppState>) -> impl Responder {
    cat::list_cats(data).await
}

/// Looks up a cat by `?name=`.
#[get("/cat")]
async fn get_cat(
    query: web::Query<NameQuery>,
    data: web::ThinData<DefaultAppState>,
) -> impl Responder {
    cat::get_cat_by_name(query.into_inner(), data).await
}

#[get("/cat/name")]
async fn last_cat_name(data: web::ThinData<DefaultAppState>) -> impl Responder {
    cat::last_cat_name(data).await
}

#[get("/cat/search")]
async fn search_cat(
    query: web::Query<NameQuery>,
    data: web::ThinData<DefaultAppState>,
) -> impl Responder {
    cat::search_cat(query.into_inner(), data).await
}

/// Creates a cat from a JSON or form body.
#[post("/cat")]
async fn create_cat(
    body: JsonOrForm<CreateCatRequest>,
    data: web::ThinData<DefaultAppState>,
) -> impl Responder {
    cat::create_cat(body_or_default(body), data).await
}

/// Adds a bed to the last added cat.
#[route("/cat/last", method = "PUT", method = "POST")]
async fn increment_last_cat(data: web::ThinData<DefaultAppState>) -> impl Responder {
    cat::increment_last_cat(data).await
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(list_cats)
        .service(last_cat_name)
        .service(search_cat)
        .service(increment_last_cat)
        .service(get_cat)
        .service(create_cat);
}
