//! Tests for user account handlers.

use super::*;
use crate::domain::ports::MockUsersService;
use crate::inbound::http::test_utils::{bearer_header, call_json, memory_state, test_app};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;

fn registration(email: &str) -> Value {
    json!({ "name": "Front Desk", "email": email, "password": "s3cret" })
}

#[actix_web::test]
async fn registration_is_public_and_hides_the_hash() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let request = actix_test::TestRequest::post()
        .uri("/users")
        .set_json(registration("Desk@Clinic.test"))
        .to_request();

    let (status, body) = call_json(&app, request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "desk@clinic.test");
    let object = body.as_object().expect("user object");
    assert_eq!(object.len(), 3);
    assert!(!object.contains_key("password"));
    assert!(!object.contains_key("password_hash"));
}

#[actix_web::test]
async fn duplicate_email_is_conflict() {
    let app = actix_test::init_service(test_app(memory_state())).await;
    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let request = actix_test::TestRequest::post()
            .uri("/users")
            .set_json(registration("desk@clinic.test"))
            .to_request();
        let (status, _) = call_json(&app, request).await;
        assert_eq!(status, expected);
    }
}

#[rstest]
#[case(json!({ "name": "", "email": "a@b.c", "password": "x" }), "name", "empty_name")]
#[case(json!({ "name": "A", "email": "abc", "password": "x" }), "email", "malformed_email")]
#[case(json!({ "name": "A", "email": "a@b.c", "password": "" }), "password", "empty_password")]
#[actix_web::test]
async fn registration_validation_names_the_field(
    #[case] body: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app(memory_state())).await;
    let request = actix_test::TestRequest::post()
        .uri("/users")
        .set_json(body)
        .to_request();

    let (status, payload) = call_json(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["details"]["field"], field);
    assert_eq!(payload["details"]["code"], code);
}

#[rstest]
#[case("GET", "/users")]
#[case("GET", "/users/1")]
#[case("DELETE", "/users/1")]
#[actix_web::test]
async fn account_routes_require_a_token(#[case] method: &str, #[case] uri: &str) {
    let mut state = memory_state();
    let mut users = MockUsersService::new();
    users.expect_list().times(0);
    users.expect_get().times(0);
    users.expect_remove().times(0);
    state.users = Arc::new(users);
    let app = actix_test::init_service(test_app(state)).await;
    let request = actix_test::TestRequest::default()
        .method(method.parse().expect("valid method"))
        .uri(uri)
        .to_request();

    let (status, _) = call_json(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn patch_forwards_only_supplied_fields() {
    let mut state = memory_state();
    let auth = bearer_header(&state);
    let mut users = MockUsersService::new();
    users
        .expect_update()
        .withf(|id, request| {
            *id == UserId::new(3)
                && request.name.is_none()
                && request.email.is_none()
                && request.password.as_deref() == Some("rotated")
        })
        .times(1)
        .returning(|id, _| {
            Ok(crate::domain::User {
                id,
                name: "Front Desk".to_owned(),
                email: crate::domain::EmailAddress::new("desk@clinic.test").expect("valid email"),
            })
        });
    state.users = Arc::new(users);
    let app = actix_test::init_service(test_app(state)).await;
    let request = actix_test::TestRequest::patch()
        .uri("/users/3")
        .insert_header(auth)
        .set_json(json!({ "password": "rotated" }))
        .to_request();

    let (status, body) = call_json(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 3);
}
