//! Metrics endpoints: metric names, a single metric family, and a full scrape.
use crate::metrics::{gather_metrics, REGISTRY};
use actix_web::{get, web, HttpResponse, Responder};
use prometheus::{Encoder, TextEncoder};

#[get("/metrics")]
async fn list_metrics() -> impl Responder {
    let metric_names: Vec<String> = REGISTRY
        .gather()
        .iter()
        .map(|mf| mf.get_name().to_string())
        .collect();
    HttpResponse::Ok().json(metric_names)
}

#[get("/metrics/{metric_name}")]
async fn metric_detail(path: web::Path<String>) -> impl Responder {
    let metric_name = path.into_inner();

    let Some(family) = REGISTRY
        .gather()
        .into_iter()
        .find(|mf| mf.get_name() == metric_name)
    else {
        return HttpResponse::NotFound().body("Metric not found");
    };

    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&[family], &mut buffer) {
        return HttpResponse::InternalServerError().body(format!("Encoding error: {}", e));
    }
    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}

#[get("/debug/metrics/scrape")]
async fn scrape_metrics() -> impl Responder {
    match gather_metrics() {
        Ok(body) => HttpResponse::Ok()
            .content_type(TextEncoder::new().format_type())
            .body(body),
        Err(e) => HttpResponse::InternalServerError().body(format!("Error: {}", e)),
    }
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(list_metrics);
    cfg.service(metric_detail);
    cfg.service(scrape_metrics);
}
