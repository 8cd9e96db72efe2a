//! Patient HTTP handlers.
//!
//! ```text
//! GET    /patients
//! POST   /patients {"name":"Alice","phone":"555-0100"}
//! GET    /patients/{id}
//! PATCH  /patients/{id} {"phone":""}
//! DELETE /patients/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CreatePatientRequest;
use crate::domain::{ApiResult, PatientChanges, PatientId};
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::dto::PatientBody;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request payload for registering a patient.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreatePatientBody {
    #[schema(example = "Alice")]
    pub name: String,
    pub phone: Option<String>,
}

/// Partial patient update; an empty `phone` clears it.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdatePatientBody {
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// List patients by id.
#[utoipa::path(
    get,
    path = "/patients",
    responses(
        (status = 200, description = "Patients ordered by id", body = [PatientBody]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "listPatients"
)]
#[get("/patients")]
pub async fn list_patients(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<PatientBody>>> {
    let patients = state.patients.list().await?;
    Ok(web::Json(patients.into_iter().map(PatientBody::from).collect()))
}

/// Register a patient.
#[utoipa::path(
    post,
    path = "/patients",
    request_body = CreatePatientBody,
    responses(
        (status = 201, description = "Patient registered", body = PatientBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "createPatient"
)]
#[post("/patients")]
pub async fn create_patient(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<CreatePatientBody>,
) -> ApiResult<HttpResponse> {
    let CreatePatientBody { name, phone } = payload.into_inner();
    let patient = state
        .patients
        .create(CreatePatientRequest { name, phone })
        .await?;
    Ok(HttpResponse::Created().json(PatientBody::from(patient)))
}

/// Fetch one patient.
#[utoipa::path(
    get,
    path = "/patients/{id}",
    params(("id" = i32, Path, description = "Patient identifier")),
    responses(
        (status = 200, description = "Patient", body = PatientBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Patient not found", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "getPatient"
)]
#[get("/patients/{id}")]
pub async fn get_patient(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<PatientBody>> {
    let patient = state.patients.get(PatientId::new(path.into_inner())).await?;
    Ok(web::Json(patient.into()))
}

/// Merge the supplied fields into a patient.
#[utoipa::path(
    patch,
    path = "/patients/{id}",
    params(("id" = i32, Path, description = "Patient identifier")),
    request_body = UpdatePatientBody,
    responses(
        (status = 200, description = "Updated patient", body = PatientBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Patient not found", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "updatePatient"
)]
#[patch("/patients/{id}")]
pub async fn update_patient(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UpdatePatientBody>,
) -> ApiResult<web::Json<PatientBody>> {
    let UpdatePatientBody { name, phone } = payload.into_inner();
    let patient = state
        .patients
        .update(PatientId::new(path.into_inner()), PatientChanges { name, phone })
        .await?;
    Ok(web::Json(patient.into()))
}

/// Delete a patient; refused with `409` while appointments or queue entries
/// still reference them.
#[utoipa::path(
    delete,
    path = "/patients/{id}",
    params(("id" = i32, Path, description = "Patient identifier")),
    responses(
        (status = 204, description = "Patient deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Patient not found", body = ErrorSchema),
        (status = 409, description = "Patient is still referenced", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "deletePatient"
)]
#[delete("/patients/{id}")]
pub async fn delete_patient(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state.patients.remove(PatientId::new(path.into_inner())).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockPatientsService;
    use crate::domain::{Error, Patient};
    use crate::inbound::http::test_utils::{bearer_header, call_json, memory_state, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use serde_json::json;
    use std::sync::Arc;

    #[actix_web::test]
    async fn create_then_fetch_patient() {
        let state = memory_state();
        let auth = bearer_header(&state);
        let app = actix_test::init_service(test_app(state)).await;

        let create = actix_test::TestRequest::post()
            .uri("/patients")
            .insert_header(auth.clone())
            .set_json(json!({ "name": "  Alice ", "phone": "555-0100" }))
            .to_request();
        let (status, created) = call_json(&app, create).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["name"], "Alice");
        assert_eq!(created["created_at"], "2024-05-01T12:00:00Z");

        let fetch = actix_test::TestRequest::get()
            .uri(&format!("/patients/{}", created["id"]))
            .insert_header(auth)
            .to_request();
        let (status, fetched) = call_json(&app, fetch).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }

    #[actix_web::test]
    async fn patch_with_empty_phone_clears_it() {
        let state = memory_state();
        let auth = bearer_header(&state);
        let app = actix_test::init_service(test_app(state)).await;
        let create = actix_test::TestRequest::post()
            .uri("/patients")
            .insert_header(auth.clone())
            .set_json(json!({ "name": "Alice", "phone": "555-0100" }))
            .to_request();
        let (_, created) = call_json(&app, create).await;

        let update = actix_test::TestRequest::patch()
            .uri(&format!("/patients/{}", created["id"]))
            .insert_header(auth)
            .set_json(json!({ "phone": "" }))
            .to_request();
        let (status, updated) = call_json(&app, update).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["phone"], serde_json::Value::Null);
        assert_eq!(updated["created_at"], created["created_at"]);
    }

    #[rstest]
    #[case(json!({ "phone": "555" }))]
    #[case(json!({ "name": 42 }))]
    #[actix_web::test]
    async fn malformed_create_body_is_rejected(#[case] body: serde_json::Value) {
        let state = memory_state();
        let auth = bearer_header(&state);
        let app = actix_test::init_service(test_app(state)).await;
        let request = actix_test::TestRequest::post()
            .uri("/patients")
            .insert_header(auth)
            .set_json(body)
            .to_request();

        let (status, payload) = call_json(&app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload["code"], "invalid_request");
    }

    #[actix_web::test]
    async fn deleting_unknown_patient_is_not_found() {
        let state = memory_state();
        let auth = bearer_header(&state);
        let app = actix_test::init_service(test_app(state)).await;
        let request = actix_test::TestRequest::delete()
            .uri("/patients/99")
            .insert_header(auth)
            .to_request();

        let (status, payload) = call_json(&app, request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(payload["message"], "Patient not found");
    }

    #[actix_web::test]
    async fn delete_answers_no_content() {
        let mut state = memory_state();
        let auth = bearer_header(&state);
        let mut patients = MockPatientsService::new();
        patients
            .expect_remove()
            .withf(|id| *id == PatientId::new(4))
            .times(1)
            .returning(|_| Ok(()));
        state.patients = Arc::new(patients);
        let app = actix_test::init_service(test_app(state)).await;
        let request = actix_test::TestRequest::delete()
            .uri("/patients/4")
            .insert_header(auth)
            .to_request();

        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn conflict_from_service_maps_to_409() {
        let mut state = memory_state();
        let auth = bearer_header(&state);
        let mut patients = MockPatientsService::new();
        patients
            .expect_remove()
            .returning(|_| Err(Error::conflict("Patient is still referenced")));
        state.patients = Arc::new(patients);
        let app = actix_test::init_service(test_app(state)).await;
        let request = actix_test::TestRequest::delete()
            .uri("/patients/1")
            .insert_header(auth)
            .to_request();

        let (status, _) = call_json(&app, request).await;

        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn list_requires_authentication() {
        let mut state = memory_state();
        let mut patients = MockPatientsService::new();
        patients.expect_list().times(0);
        state.patients = Arc::new(patients);
        let app = actix_test::init_service(test_app(state)).await;
        let request = actix_test::TestRequest::get().uri("/patients").to_request();

        let (status, _) = call_json(&app, request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn list_serialises_snake_case_fields() {
        let mut state = memory_state();
        let auth = bearer_header(&state);
        let mut patients = MockPatientsService::new();
        patients.expect_list().returning(|| {
            Ok(vec![Patient {
                id: PatientId::new(1),
                name: "Alice".to_owned(),
                phone: None,
                created_at: Utc
                    .with_ymd_and_hms(2024, 5, 1, 9, 0, 0)
                    .single()
                    .expect("valid timestamp"),
            }])
        });
        state.patients = Arc::new(patients);
        let app = actix_test::init_service(test_app(state)).await;
        let request = actix_test::TestRequest::get()
            .uri("/patients")
            .insert_header(auth)
            .to_request();

        let (status, payload) = call_json(&app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            payload,
            json!([{
                "id": 1,
                "name": "Alice",
                "phone": null,
                "created_at": "2024-05-01T09:00:00Z"
            }])
        );
    }
}
