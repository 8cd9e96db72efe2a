//! Test helpers for inbound HTTP components.
//!
//! Handlers are exercised against real domain services over the in-memory
//! store, with a clock pinned to 2024-05-01 12:00 UTC. Individual tests swap
//! a port for a mock when they need to force a failure.

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::{self, HeaderName};
use actix_web::{App, test as actix_test, web};
use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use mockable::{Clock, MockClock};
use serde_json::Value;

use crate::domain::ports::{CreatePatientRequest, RegisterUserRequest};
use crate::domain::{AuthenticatedIdentity, DoctorDraft, DoctorId, PatientId, UserId};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::MemoryStore;
use crate::outbound::security::JwtTokenService;
use crate::server::memory_http_state;

pub(crate) const TEST_SECRET: &[u8] = b"http-adapter-test-secret-32-bytes";

pub(crate) fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(crate) fn fixed_clock() -> Arc<dyn Clock> {
    let mut clock = MockClock::new();
    clock.expect_utc().returning(noon);
    Arc::new(clock)
}

/// State wired to fresh in-memory storage and real services.
pub(crate) fn memory_state() -> HttpState {
    let clock = fixed_clock();
    let tokens = Arc::new(JwtTokenService::new(
        TEST_SECRET,
        Duration::minutes(60),
        Arc::clone(&clock),
    ));
    memory_http_state(MemoryStore::new(), tokens, clock)
}

/// `Authorization` header carrying a token for user 1.
pub(crate) fn bearer_header(state: &HttpState) -> (HeaderName, String) {
    let token = state
        .tokens
        .issue(&AuthenticatedIdentity {
            user_id: UserId::new(1),
            email: "desk@clinic.test".to_owned(),
        })
        .expect("token issued");
    (
        header::AUTHORIZATION,
        format!("Bearer {}", token.access_token),
    )
}

pub(crate) fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(super::configure)
}

/// Call the app and decode the JSON body.
pub(crate) async fn call_json<S>(app: &S, request: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = actix_test::call_service(app, request).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON response body")
    };
    (status, value)
}

pub(crate) async fn register_user(state: &HttpState, email: &str, password: &str) {
    state
        .users
        .register(RegisterUserRequest {
            name: "Front Desk".to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        })
        .await
        .expect("user registered");
}

pub(crate) async fn seed_patient(state: &HttpState, name: &str) -> PatientId {
    state
        .patients
        .create(CreatePatientRequest {
            name: name.to_owned(),
            phone: None,
        })
        .await
        .expect("patient created")
        .id
}

/// Doctor on duty 09:00 to 17:00.
pub(crate) async fn seed_doctor(state: &HttpState, name: &str) -> DoctorId {
    state
        .doctors
        .create(DoctorDraft {
            name: name.to_owned(),
            specialization: "GP".to_owned(),
            gender: "female".to_owned(),
            location: "Room 1".to_owned(),
            available_from: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
            available_to: NaiveTime::from_hms_opt(17, 0, 0).expect("valid time"),
        })
        .await
        .expect("doctor created")
        .id
}
