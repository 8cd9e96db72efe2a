//! Bearer-token authentication for HTTP handlers.
//!
//! ```text
//! POST /auth/login {"email":"desk@clinic.test","password":"secret"}
//! GET /auth/me
//! ```
//!
//! Protected handlers take an [`AuthenticatedUser`] argument; extraction
//! fails with `401 Unauthorized` unless the request carries
//! `Authorization: Bearer <token>` with a valid, unexpired token.

use actix_web::http::header::{self, HeaderValue};
use actix_web::{FromRequest, HttpRequest, dev::Payload, get, post, web};
use futures_util::future::{Ready, ready};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::ports::TokenError;
use crate::domain::{
    ApiResult, AuthenticatedIdentity, Error, LoginCredentials, LoginValidationError, UserId,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

const BEARER_SCHEME: &str = "bearer";

/// Identity of the caller, decoded from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(AuthenticatedIdentity);

impl AuthenticatedUser {
    /// Authenticated user id.
    pub fn user_id(&self) -> UserId {
        self.0.user_id
    }

    /// Email carried by the token.
    pub fn email(&self) -> &str {
        self.0.email.as_str()
    }
}

fn bearer_token(value: &HeaderValue) -> Result<&str, Error> {
    let raw = value
        .to_str()
        .map_err(|_| Error::unauthorized("authorization header is not valid text"))?;
    let (scheme, token) = raw
        .trim()
        .split_once(' ')
        .ok_or_else(|| Error::unauthorized("authorization header must use the Bearer scheme"))?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(Error::unauthorized(
            "authorization header must use the Bearer scheme",
        ));
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::unauthorized("bearer token is empty"));
    }
    Ok(token)
}

fn map_token_error(error: TokenError) -> Error {
    match error {
        TokenError::Expired => Error::unauthorized("token has expired"),
        TokenError::Invalid { message } => {
            debug!(%message, "bearer token rejected");
            Error::unauthorized("invalid token")
        }
        TokenError::Issue { message } => Error::internal(format!("token service failed: {message}")),
    }
}

fn authenticate_request(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not registered"))?;
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("login required"))?;
    let token = bearer_token(header)?;
    state
        .tokens
        .verify(token)
        .map(AuthenticatedUser)
        .map_err(map_token_error)
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate_request(req))
    }
}

/// Login request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "desk@clinic.test")]
    pub email: String,
    #[schema(example = "correct horse battery staple")]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Successful login payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
}

/// Identity decoded from the presented token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    #[schema(example = 1)]
    pub user_id: i32,
    #[schema(example = "desk@clinic.test")]
    pub email: String,
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    let (field, code) = match err {
        LoginValidationError::EmptyEmail => ("email", "empty_email"),
        LoginValidationError::EmptyPassword => ("password", "empty_password"),
    };
    Error::invalid_request(err.to_string())
        .with_details(serde_json::json!({ "field": field, "code": code }))
}

/// Exchange credentials for a bearer token.
///
/// Unknown emails and wrong passwords produce the same `401` body.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let token = state.login.login(&credentials).await?;
    Ok(web::Json(LoginResponse {
        access_token: token.access_token,
    }))
}

/// Return the identity carried by the caller's token.
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current identity", body = MeResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "currentUser",
    security(("BearerAuth" = []))
)]
#[get("/auth/me")]
pub async fn me(user: AuthenticatedUser) -> web::Json<MeResponse> {
    web::Json(MeResponse {
        user_id: user.user_id().get(),
        email: user.email().to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockLoginService, MockTokenService};
    use crate::inbound::http::test_utils::{
        bearer_header, call_json, memory_state, register_user, test_app,
    };
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;

    #[rstest]
    #[case("Bearer abc", "abc")]
    #[case("bearer   abc  ", "abc")]
    fn bearer_token_is_extracted(#[case] raw: &str, #[case] expected: &str) {
        let value = HeaderValue::from_str(raw).expect("valid header");
        assert_eq!(bearer_token(&value).expect("token"), expected);
    }

    #[rstest]
    #[case("Basic abc")]
    #[case("Bearer")]
    #[case("Bearer   ")]
    fn malformed_authorization_is_unauthorized(#[case] raw: &str) {
        let value = HeaderValue::from_str(raw).expect("valid header");
        let err = bearer_token(&value).expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[case(TokenError::expired(), ErrorCode::Unauthorized)]
    #[case(TokenError::invalid("bad signature"), ErrorCode::Unauthorized)]
    #[case(TokenError::issue("key"), ErrorCode::InternalError)]
    fn token_errors_map_to_http_codes(#[case] error: TokenError, #[case] expected: ErrorCode) {
        assert_eq!(map_token_error(error).code(), expected);
    }

    #[actix_web::test]
    async fn me_requires_a_token() {
        let app = actix_test::init_service(test_app(memory_state())).await;
        let request = actix_test::TestRequest::get().uri("/auth/me").to_request();

        let (status, body) = call_json(&app, request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "login required");
    }

    #[actix_web::test]
    async fn me_returns_decoded_identity() {
        let state = memory_state();
        let header = bearer_header(&state);
        let app = actix_test::init_service(test_app(state)).await;
        let request = actix_test::TestRequest::get()
            .uri("/auth/me")
            .insert_header(header)
            .to_request();

        let (status, body) = call_json(&app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "user_id": 1, "email": "desk@clinic.test" }));
    }

    #[actix_web::test]
    async fn rejected_token_is_unauthorized() {
        let mut state = memory_state();
        let mut tokens = MockTokenService::new();
        tokens
            .expect_verify()
            .returning(|_| Err(TokenError::expired()));
        state.tokens = Arc::new(tokens);
        let app = actix_test::init_service(test_app(state)).await;
        let request = actix_test::TestRequest::get()
            .uri("/auth/me")
            .insert_header(("Authorization", "Bearer stale"))
            .to_request();

        let (status, body) = call_json(&app, request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "token has expired");
    }

    #[actix_web::test]
    async fn login_issues_a_token_accepted_by_me() {
        let state = memory_state();
        register_user(&state, "desk@clinic.test", "secret").await;
        let app = actix_test::init_service(test_app(state)).await;

        let login_req = actix_test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({ "email": " Desk@Clinic.test ", "password": "secret" }))
            .to_request();
        let (status, body) = call_json(&app, login_req).await;
        assert_eq!(status, StatusCode::OK);
        let token = body["access_token"].as_str().expect("token string").to_owned();

        let me_req = actix_test::TestRequest::get()
            .uri("/auth/me")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let (status, body) = call_json(&app, me_req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "desk@clinic.test");
    }

    #[actix_web::test]
    async fn unknown_email_and_wrong_password_look_the_same() {
        let state = memory_state();
        register_user(&state, "desk@clinic.test", "secret").await;
        let app = actix_test::init_service(test_app(state)).await;

        let mut bodies: Vec<Value> = Vec::new();
        for (email, password) in [("nobody@clinic.test", "secret"), ("desk@clinic.test", "nope")] {
            let request = actix_test::TestRequest::post()
                .uri("/auth/login")
                .set_json(json!({ "email": email, "password": password }))
                .to_request();
            let (status, mut body) = call_json(&app, request).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            if let Some(object) = body.as_object_mut() {
                object.remove("traceId");
            }
            bodies.push(body);
        }

        assert_eq!(bodies[0], bodies[1]);
        assert_eq!(bodies[0]["message"], "invalid credentials");
    }

    #[rstest]
    #[case("   ", "secret", "email", "empty_email")]
    #[case("desk@clinic.test", "", "password", "empty_password")]
    #[actix_web::test]
    async fn login_validates_payload_before_calling_service(
        #[case] email: &str,
        #[case] password: &str,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let mut state = memory_state();
        let mut login_service = MockLoginService::new();
        login_service.expect_login().times(0);
        state.login = Arc::new(login_service);
        let app = actix_test::init_service(test_app(state)).await;
        let request = actix_test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request();

        let (status, body) = call_json(&app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["field"], field);
        assert_eq!(body["details"]["code"], code);
    }
}
