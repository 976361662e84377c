//! HTTP tests for the service endpoints outside the code flow

mod common;

use actix_web::{http::StatusCode, test, web};
use serde_json::Value;

use otc_api::create_app;

use common::harness;

#[actix_web::test]
async fn test_root_lists_endpoints() {
    let harness = harness();
    let app = test::init_service(create_app(web::Data::new(harness.state), &[])).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let endpoints = body["endpoints"].as_array().unwrap();
    assert!(endpoints.contains(&Value::from("/send-code")));
    assert!(endpoints.contains(&Value::from("/verify-code")));
}

#[actix_web::test]
async fn test_health_reports_store_backend() {
    let harness = harness();
    let app = test::init_service(create_app(web::Data::new(harness.state), &[])).await;

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "memory");
    assert_eq!(body["channel"], "sms");
}

#[actix_web::test]
async fn test_unknown_route_is_json_404() {
    let harness = harness();
    let app = test::init_service(create_app(web::Data::new(harness.state), &[])).await;

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "not_found");
}
