//! Integration tests for registration, role gating, and the open endpoints

mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use common::{basic_auth, ADMIN_PASSWORD, ADMIN_USERNAME};
use serde_json::{json, Value};

fn registration_payload() -> Value {
    json!({
        "username": "new_user",
        "email": "new_user@example.com",
        "age": 30,
        "password": "supersecret123"
    })
}

#[actix_web::test]
async fn test_register_then_authenticate() {
    let state = common::test_state().await;
    let app = init_test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(registration_payload())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["username"], "new_user");
    assert_eq!(body["email"], "new_user@example.com");
    assert_eq!(body["age"], 30);
    assert_eq!(body["role"], "user");
    assert!(body.get("password").is_none());
    assert!(body.get("hashed_password").is_none());

    // The fresh account authenticates immediately
    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header(basic_auth("new_user", "supersecret123"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_duplicate_registration_is_conflict() {
    let state = common::test_state().await;
    let app = init_test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(registration_payload())
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    // Same username again, different casing: uniqueness is case-insensitive
    let mut payload = registration_payload();
    payload["username"] = json!("New_User");
    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(payload)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["detail"], "User already exists");
}

#[actix_web::test]
async fn test_login_is_case_insensitive() {
    let state = common::test_state().await;
    let app = init_test_app!(state);

    // Seeded as "john_doe"; mixed-case lookup must resolve the same account
    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header(basic_auth("John_Doe", "qwerty123"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["username"], "john_doe");
}

#[actix_web::test]
async fn test_invalid_payload_reports_all_issues() {
    let state = common::test_state().await;
    let app = init_test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({
            "username": "broken",
            "email": "not-an-email",
            "age": 30,
            "password": "short"
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(res).await;
    let issues = body["detail"].as_array().expect("detail must be a list");
    assert_eq!(issues.len(), 2);
    let fields: Vec<&str> = issues
        .iter()
        .map(|issue| issue["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"password"));
}

#[actix_web::test]
async fn test_malformed_json_gets_validation_envelope() {
    let state = common::test_state().await;
    let app = init_test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["detail"][0]["field"], "body");
}

#[actix_web::test]
async fn test_user_listing_requires_admin_role() {
    let state = common::test_state().await;
    let app = init_test_app!(state);

    // Regular user: authenticated but forbidden
    let req = test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header(basic_auth("john_doe", "qwerty123"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Admin: full listing, sorted by username
    let req = test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header(basic_auth(ADMIN_USERNAME, ADMIN_PASSWORD))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = test::read_body_json(res).await;
    let usernames: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|user| user["username"].as_str().unwrap())
        .collect();
    assert_eq!(usernames, vec!["jane_admin", "john_doe"]);
}

#[actix_web::test]
async fn test_prediction_threshold() {
    let state = common::test_state().await;
    let app = init_test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/predictions")
        .set_json(json!({ "age": 42, "income": 70000.0, "occupation": "engineer" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["prediction"], "positive");

    // The threshold itself is not above the threshold
    let req = test::TestRequest::post()
        .uri("/api/v1/predictions")
        .set_json(json!({ "age": 30 }))
        .to_request();
    let res = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["prediction"], "negative");
}

#[actix_web::test]
async fn test_health_endpoint() {
    let state = common::test_state().await;
    let app = init_test_app!(state);

    let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], "ok");
}
