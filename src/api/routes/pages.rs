//! Routes for the HTML pages.

use crate::{api::controllers::pages, models::DefaultAppState};
use actix_web::{get, web, Responder};

#[get("/")]
async fn home(data: web::ThinData<DefaultAppState>) -> impl Responder {
    pages::home(data).await
}

#[get("/page1")]
async fn page1(data: web::ThinData<DefaultAppState>) -> impl Responder {
    pages::cats_page(data).await
}

#[get("/page2")]
async fn page2() -> impl Responder {
    pages::create_cat_page().await
}

#[get("/page3")]
async fn page3() -> impl Responder {
    pages::search_page().await
}

#[get("/page4")]
async fn page4(data: web::ThinData<DefaultAppState>) -> impl Responder {
    pages::dogs_page(data).await
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(home)
        .service(page1)
        .service(page2)
        .service(page3)
        .service(page4);
}
