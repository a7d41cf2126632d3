//! Metrics middleware wired around the real routes.
use actix_web::{http::StatusCode, test, web, App};
use pet_records::{
    api::routes::{configure_routes, metrics, not_found},
    metrics::{
        middleware::MetricsMiddleware, ERROR_COUNTER, RAW_REQUEST_COUNTER, RECORDS_CREATED,
        REGISTRY, REQUEST_COUNTER,
    },
    models::AppState,
    repositories::RecordRepositoryStorage,
};
use serde_json::json;
use std::sync::Arc;

#[actix_web::test]
async fn test_middleware_counts_requests_and_errors() {
    let state = AppState::new(
        Arc::new(RecordRepositoryStorage::new_in_memory()),
        Arc::new(RecordRepositoryStorage::new_in_memory()),
    );
    let app = test::init_service(
        App::new()
            .wrap(MetricsMiddleware)
            .app_data(web::ThinData(state))
            .configure(configure_routes)
            .configure(metrics::init)
            .default_service(web::to(not_found)),
    )
    .await;

    let ok_before = REQUEST_COUNTER
        .with_label_values(&["/health", "GET", "200"])
        .get();
    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let ok_after = REQUEST_COUNTER
        .with_label_values(&["/health", "GET", "200"])
        .get();
    assert!(ok_after >= ok_before + 1.0);

    let bad_before = ERROR_COUNTER
        .with_label_values(&["/dog", "POST", "400"])
        .get();
    let req = test::TestRequest::post()
        .uri("/dog")
        .set_json(json!({"name": "Rex"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bad_after = ERROR_COUNTER
        .with_label_values(&["/dog", "POST", "400"])
        .get();
    assert!(bad_after >= bad_before + 1.0);

    let created_before = RECORDS_CREATED.with_label_values(&["dog"]).get();
    let req = test::TestRequest::post()
        .uri("/dog")
        .set_json(json!({"name": "Rex", "age": 3, "breed": "Lab"}))
        .to_request();
    test::call_service(&app, req).await;
    assert!(RECORDS_CREATED.with_label_values(&["dog"]).get() >= created_before + 1.0);

    let req = test::TestRequest::get()
        .uri("/debug/metrics/scrape")
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let text = String::from_utf8_lossy(&body);
    assert!(text.contains("requests_total"));
    assert!(text.contains("records_created_total"));
}

#[actix_web::test]
async fn test_raw_counter_ignores_query_string() {
    let state = AppState::new(
        Arc::new(RecordRepositoryStorage::new_in_memory()),
        Arc::new(RecordRepositoryStorage::new_in_memory()),
    );
    let app = test::init_service(
        App::new()
            .wrap(MetricsMiddleware)
            .app_data(web::ThinData(state))
            .configure(configure_routes),
    )
    .await;

    let labels = ["/dog/search", "GET", "200"];
    let before = RAW_REQUEST_COUNTER.with_label_values(&labels).get();
    for name in ["Rex", "Fido", "Spot"] {
        let req = test::TestRequest::get()
            .uri(&format!("/dog/search?name={}", name))
            .to_request();
        test::call_service(&app, req).await;
    }
    assert!(RAW_REQUEST_COUNTER.with_label_values(&labels).get() >= before + 3.0);

    let families = REGISTRY.gather();
    let raw = families
        .iter()
        .find(|mf| mf.get_name() == "raw_requests_total")
        .expect("raw_requests_total not registered");
    let query_series = raw.get_metric().iter().any(|m| {
        m.get_label()
            .iter()
            .any(|l| l.get_name() == "raw_path" && l.get_value().contains('?'))
    });
    assert!(!query_series, "query strings must not become label values");
}
