//! Doctor roster HTTP handlers.
//!
//! ```text
//! GET    /doctors
//! POST   /doctors {"name":"Dr. X","specialization":"GP","gender":"female",
//!                  "location":"Room 1","available_from":"09:00","available_to":"17:00"}
//! GET    /doctors/{id}
//! PATCH  /doctors/{id} {"available_to":"18:30"}
//! DELETE /doctors/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ApiResult, DoctorChanges, DoctorDraft, DoctorId, Error};
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::dto::DoctorBody;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional_time, parse_time};

const AVAILABLE_FROM: FieldName = FieldName::new("available_from");
const AVAILABLE_TO: FieldName = FieldName::new("available_to");

/// Request payload for adding a doctor.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateDoctorBody {
    #[schema(example = "Dr. X")]
    pub name: String,
    #[schema(example = "GP")]
    pub specialization: String,
    #[schema(example = "female")]
    pub gender: String,
    #[schema(example = "Room 1")]
    pub location: String,
    #[schema(example = "09:00")]
    pub available_from: String,
    #[schema(example = "17:00")]
    pub available_to: String,
}

impl TryFrom<CreateDoctorBody> for DoctorDraft {
    type Error = Error;

    fn try_from(value: CreateDoctorBody) -> Result<Self, Self::Error> {
        Ok(Self {
            available_from: parse_time(&value.available_from, AVAILABLE_FROM)?,
            available_to: parse_time(&value.available_to, AVAILABLE_TO)?,
            name: value.name,
            specialization: value.specialization,
            gender: value.gender,
            location: value.location,
        })
    }
}

/// Partial doctor update.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateDoctorBody {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub gender: Option<String>,
    pub location: Option<String>,
    pub available_from: Option<String>,
    pub available_to: Option<String>,
}

impl TryFrom<UpdateDoctorBody> for DoctorChanges {
    type Error = Error;

    fn try_from(value: UpdateDoctorBody) -> Result<Self, Self::Error> {
        Ok(Self {
            available_from: parse_optional_time(value.available_from.as_deref(), AVAILABLE_FROM)?,
            available_to: parse_optional_time(value.available_to.as_deref(), AVAILABLE_TO)?,
            name: value.name,
            specialization: value.specialization,
            gender: value.gender,
            location: value.location,
        })
    }
}

/// List doctors by id.
#[utoipa::path(
    get,
    path = "/doctors",
    responses(
        (status = 200, description = "Doctors ordered by id", body = [DoctorBody]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["doctors"],
    operation_id = "listDoctors"
)]
#[get("/doctors")]
pub async fn list_doctors(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<DoctorBody>>> {
    let doctors = state.doctors.list().await?;
    Ok(web::Json(doctors.into_iter().map(DoctorBody::from).collect()))
}

/// Register a doctor.
#[utoipa::path(
    post,
    path = "/doctors",
    request_body = CreateDoctorBody,
    responses(
        (status = 201, description = "Doctor added", body = DoctorBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["doctors"],
    operation_id = "createDoctor"
)]
#[post("/doctors")]
pub async fn create_doctor(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<CreateDoctorBody>,
) -> ApiResult<HttpResponse> {
    let draft = DoctorDraft::try_from(payload.into_inner())?;
    let doctor = state.doctors.create(draft).await?;
    Ok(HttpResponse::Created().json(DoctorBody::from(doctor)))
}

/// Fetch one doctor.
#[utoipa::path(
    get,
    path = "/doctors/{id}",
    params(("id" = i32, Path, description = "Doctor identifier")),
    responses(
        (status = 200, description = "Doctor", body = DoctorBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Doctor not found", body = ErrorSchema)
    ),
    tags = ["doctors"],
    operation_id = "getDoctor"
)]
#[get("/doctors/{id}")]
pub async fn get_doctor(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<DoctorBody>> {
    let doctor = state.doctors.get(DoctorId::new(path.into_inner())).await?;
    Ok(web::Json(doctor.into()))
}

/// Merge the supplied fields; the availability window is re-checked.
#[utoipa::path(
    patch,
    path = "/doctors/{id}",
    params(("id" = i32, Path, description = "Doctor identifier")),
    request_body = UpdateDoctorBody,
    responses(
        (status = 200, description = "Updated doctor", body = DoctorBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Doctor not found", body = ErrorSchema)
    ),
    tags = ["doctors"],
    operation_id = "updateDoctor"
)]
#[patch("/doctors/{id}")]
pub async fn update_doctor(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UpdateDoctorBody>,
) -> ApiResult<web::Json<DoctorBody>> {
    let changes = DoctorChanges::try_from(payload.into_inner())?;
    let doctor = state
        .doctors
        .update(DoctorId::new(path.into_inner()), changes)
        .await?;
    Ok(web::Json(doctor.into()))
}

/// Delete a doctor with no appointments.
#[utoipa::path(
    delete,
    path = "/doctors/{id}",
    params(("id" = i32, Path, description = "Doctor identifier")),
    responses(
        (status = 204, description = "Doctor deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Doctor not found", body = ErrorSchema),
        (status = 409, description = "Doctor still has appointments", body = ErrorSchema)
    ),
    tags = ["doctors"],
    operation_id = "deleteDoctor"
)]
#[delete("/doctors/{id}")]
pub async fn delete_doctor(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state.doctors.remove(DoctorId::new(path.into_inner())).await?;
    Ok(HttpResponse::NoContent().finish())
}
