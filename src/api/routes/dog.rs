//! Routes for the dog endpoints.

use crate::{
    api::{
        controllers::dog,
        routes::{body_or_default, JsonOrForm},
    },
    models::{CreateDogRequest, DefaultAppState, NameQuery},
};
use actix_web::{get, post, route, web, Responder};

#[get("/dogs")]
async fn list_dogs(data: web::ThinData<DefaultAppState>) -> impl Responder {
    dog::list_dogs(data).await
}

#[get("/dog")]
async fn get_dog(
    query: web::Query<NameQuery>,
    data: web::ThinData<DefaultAppState>,
) -> impl Responder {
    dog::get_dog_by_name(query.into_inner(), data).await
}

#[get("/dog/name")]
async fn last_dog_name(data: web::ThinData<DefaultAppState>) -> impl Responder {
    dog::last_dog_name(data).await
}

#[get("/dog/search")]
async fn search_dog(
    query: web::Query<NameQuery>,
    data: web::ThinData<DefaultAppState>,
) -> impl Responder {
    dog::search_dog(query.into_inner(), data).await
}

#[post("/dog")]
async fn create_dog(
    body: JsonOrForm<CreateDogRequest>,
    data: web::ThinData<DefaultAppState>,
) -> impl Responder {
    dog::create_dog(body_or_default(body), data).await
}

#[route("/dog/last", method = "PUT", method = "POST")]
async fn increment_last_dog(data: web::ThinData<DefaultAppState>) -> impl Responder {
    dog::increment_last_dog(data).await
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(list_dogs)
        .service(last_dog_name)
        .service(search_dog)
        .service(increment_last_dog)
        .service(get_dog)
        .service(create_dog);
}
