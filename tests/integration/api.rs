//! End-to-end tests of the HTTP surface over in-memory stores.
use actix_web::{body::MessageBody, dev::ServiceResponse, http::StatusCode, test, web, App};
use pet_records::{
    api::routes::{configure_routes, not_found},
    models::{AppState, DefaultAppState},
    repositories::RecordRepositoryStorage,
};
use serde_json::{json, Value};
use std::sync::Arc;

fn fresh_state() -> DefaultAppState {
    AppState::new(
        Arc::new(RecordRepositoryStorage::new_in_memory()),
        Arc::new(RecordRepositoryStorage::new_in_memory()),
    )
}

macro_rules! init_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::ThinData(fresh_state()))
                .configure(configure_routes)
                .default_service(web::to(not_found)),
        )
        .await
    };
}

async fn body_text<B: MessageBody>(resp: ServiceResponse<B>) -> String {
    let bytes = test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[actix_web::test]
async fn test_create_cat_then_find_it() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/cat")
        .set_json(json!({"firstname": "Anne", "lastname": "Bonny", "beds": 3}))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created, json!({"name": "Anne Bonny", "beds": 3}));

    let req = test::TestRequest::get()
        .uri("/cat?name=Anne%20Bonny")
        .to_request();
    let found: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(found["name"], "Anne Bonny");
    assert_eq!(found["bedsOwned"], 3);
    assert!(found["_id"].is_string());
    assert!(found["createdDate"].is_string());

    let req = test::TestRequest::get().uri("/cat/name").to_request();
    let last: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(last, json!({"name": "Anne Bonny"}));

    let req = test::TestRequest::get().uri("/cats").to_request();
    let cats: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(cats.as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn test_duplicate_cat_reports_store_error() {
    let app = init_app!();

    for beds in [3, 5] {
        let beds_text = beds.to_string();
        let req = test::TestRequest::post()
            .uri("/cat")
            .set_form([("firstname", "Anne"), ("lastname", "Bonny"), ("beds", beds_text.as_str())])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        if beds == 5 {
            assert_eq!(body["err"]["name"], "ConstraintViolation");
        }
    }

    let req = test::TestRequest::get()
        .uri("/cat?name=Anne%20Bonny")
        .to_request();
    let found: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(found["bedsOwned"], 3);
}

#[actix_web::test]
async fn test_create_cat_missing_field() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/cat")
        .set_json(json!({"firstname": "Anne", "beds": 3}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"error": "firstname,lastname and beds are all required"})
    );

    let req = test::TestRequest::get().uri("/cats").to_request();
    let cats: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(cats, json!([]));
}

#[actix_web::test]
async fn test_negative_beds_is_rejected_by_store() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/cat")
        .set_json(json!({"firstname": "Anne", "lastname": "Bonny", "beds": -1}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["err"]["name"], "ValidationError");

    let req = test::TestRequest::get().uri("/cats").to_request();
    let cats: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(cats, json!([]));

    let req = test::TestRequest::get().uri("/cat/name").to_request();
    let last: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(last, json!({"name": "unknown"}));
}

#[actix_web::test]
async fn test_increment_past_max_beds_reports_error() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/cat")
        .set_json(json!({"firstname": "Max", "lastname": "Beds", "beds": "9223372036854775807"}))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created, json!({"name": "Max Beds", "beds": i64::MAX}));

    let req = test::TestRequest::put().uri("/cat/last").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["err"]["name"], "ValidationError");

    let req = test::TestRequest::get().uri("/cat/search?name=Max%20Beds").to_request();
    let found: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(found, json!({"name": "Max Beds", "beds": i64::MAX}));
}

#[actix_web::test]
async fn test_home_page_shows_last_cat() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/").to_request();
    let body = body_text(test::call_service(&app, req).await).await;
    assert!(body.contains("unknown"));

    let req = test::TestRequest::post()
        .uri("/cat")
        .set_json(json!({"firstname": "Tom", "lastname": "Kitten", "beds": "2"}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));
    assert!(body_text(resp).await.contains("Tom Kitten"));

    let req = test::TestRequest::get().uri("/page1").to_request();
    assert!(body_text(test::call_service(&app, req).await)
        .await
        .contains("Tom Kitten"));
}

#[actix_web::test]
async fn test_two_increments_add_two_beds() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/cat")
        .set_json(json!({"firstname": "Anne", "lastname": "Bonny", "beds": 3}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::put().uri("/cat/last").to_request();
    test::call_service(&app, req).await;
    let req = test::TestRequest::post().uri("/cat/last").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"name": "Anne Bonny", "beds": 5}));

    let req = test::TestRequest::get()
        .uri("/cat/search?name=Anne%20Bonny")
        .to_request();
    let found: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(found, json!({"name": "Anne Bonny", "beds": 5}));
}

#[actix_web::test]
async fn test_cat_search_edge_cases() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/cat/search").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"error": "Name is required to perform a search"}));

    let req = test::TestRequest::get()
        .uri("/cat/search?name=Nobody")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({}));

    let req = test::TestRequest::get().uri("/cat?name=Nobody").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, Value::Null);
}

#[actix_web::test]
async fn test_dog_flow() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri("/dog/search?name=Rex")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"error": "No dogs found"}));

    let req = test::TestRequest::post()
        .uri("/dog")
        .set_json(json!({"name": "Rex", "breed": "Lab"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "name, age and breed are all required"}));

    let req = test::TestRequest::get().uri("/dogs").to_request();
    let dogs: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(dogs, json!([]));

    let req = test::TestRequest::post()
        .uri("/dog")
        .set_form([("name", "Rex"), ("age", "4"), ("breed", "Lab")])
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"name": "Rex", "age": 4, "breed": "Lab"}));

    let req = test::TestRequest::put().uri("/dog/last").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["age"], 5);

    let req = test::TestRequest::get()
        .uri("/dog/search?name=Rex")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"name": "Rex", "age": 5, "breed": "Lab"}));

    let req = test::TestRequest::get().uri("/page4").to_request();
    let page = body_text(test::call_service(&app, req).await).await;
    assert!(page.contains("Rex"));
}

#[actix_web::test]
async fn test_unknown_route_is_html_404() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri("/no/such/page?x=1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_text(resp).await.contains("/no/such/page?x=1"));
}

#[actix_web::test]
async fn test_health() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "OK");
}
