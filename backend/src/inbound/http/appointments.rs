//! Appointment booking HTTP handlers.
//!
//! ```text
//! GET    /appointments
//! POST   /appointments {"patientId":1,"doctorId":1,"date":"2024-05-01","time":"10:00"}
//! GET    /appointments/{id}
//! PATCH  /appointments/{id} {"status":"completed"}
//! DELETE /appointments/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    ApiResult, AppointmentChanges, AppointmentId, AppointmentStatus, DoctorId, Error,
    NewAppointment, PatientId,
};
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::dto::AppointmentBody;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_date, parse_optional_date, parse_optional_time, parse_status, parse_time,
};

const DATE: FieldName = FieldName::new("date");
const TIME: FieldName = FieldName::new("time");
const STATUS: FieldName = FieldName::new("status");
const STATUSES: [&str; 3] = ["booked", "completed", "canceled"];

/// Request payload for booking an appointment.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentBody {
    #[schema(example = 1)]
    pub patient_id: i32,
    #[schema(example = 1)]
    pub doctor_id: i32,
    #[schema(example = "2024-05-01")]
    pub date: String,
    #[schema(example = "10:00")]
    pub time: String,
}

impl TryFrom<CreateAppointmentBody> for NewAppointment {
    type Error = Error;

    fn try_from(value: CreateAppointmentBody) -> Result<Self, Self::Error> {
        Ok(Self {
            patient_id: PatientId::new(value.patient_id),
            doctor_id: DoctorId::new(value.doctor_id),
            date: parse_date(&value.date, DATE)?,
            time: parse_time(&value.time, TIME)?,
        })
    }
}

/// Partial appointment update.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateAppointmentBody {
    #[schema(example = "2024-05-02")]
    pub date: Option<String>,
    #[schema(example = "11:30")]
    pub time: Option<String>,
    #[schema(example = "completed")]
    pub status: Option<String>,
}

impl TryFrom<UpdateAppointmentBody> for AppointmentChanges {
    type Error = Error;

    fn try_from(value: UpdateAppointmentBody) -> Result<Self, Self::Error> {
        Ok(Self {
            date: parse_optional_date(value.date.as_deref(), DATE)?,
            time: parse_optional_time(value.time.as_deref(), TIME)?,
            status: value
                .status
                .as_deref()
                .map(|raw| parse_status::<AppointmentStatus>(raw, STATUS, &STATUSES))
                .transpose()?,
        })
    }
}

/// List appointments by date, then time.
#[utoipa::path(
    get,
    path = "/appointments",
    responses(
        (status = 200, description = "Appointments ordered by date then time", body = [AppointmentBody]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["appointments"],
    operation_id = "listAppointments"
)]
#[get("/appointments")]
pub async fn list_appointments(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<AppointmentBody>>> {
    let appointments = state.appointments.list().await?;
    Ok(web::Json(
        appointments.into_iter().map(AppointmentBody::from).collect(),
    ))
}

/// Book an appointment; the patient is checked before the doctor.
#[utoipa::path(
    post,
    path = "/appointments",
    request_body = CreateAppointmentBody,
    responses(
        (status = 201, description = "Appointment booked", body = AppointmentBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Patient or doctor not found", body = ErrorSchema)
    ),
    tags = ["appointments"],
    operation_id = "createAppointment"
)]
#[post("/appointments")]
pub async fn create_appointment(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<CreateAppointmentBody>,
) -> ApiResult<HttpResponse> {
    let request = NewAppointment::try_from(payload.into_inner())?;
    let appointment = state.appointments.book(request).await?;
    Ok(HttpResponse::Created().json(AppointmentBody::from(appointment)))
}

/// Fetch one appointment with its patient and doctor.
#[utoipa::path(
    get,
    path = "/appointments/{id}",
    params(("id" = i32, Path, description = "Appointment identifier")),
    responses(
        (status = 200, description = "Appointment", body = AppointmentBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Appointment not found", body = ErrorSchema)
    ),
    tags = ["appointments"],
    operation_id = "getAppointment"
)]
#[get("/appointments/{id}")]
pub async fn get_appointment(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<AppointmentBody>> {
    let appointment = state
        .appointments
        .get(AppointmentId::new(path.into_inner()))
        .await?;
    Ok(web::Json(appointment.into()))
}

/// Reschedule or change the status of an appointment.
///
/// `completed` and `canceled` are terminal; any change to such an
/// appointment is rejected.
#[utoipa::path(
    patch,
    path = "/appointments/{id}",
    params(("id" = i32, Path, description = "Appointment identifier")),
    request_body = UpdateAppointmentBody,
    responses(
        (status = 200, description = "Updated appointment", body = AppointmentBody),
        (status = 400, description = "Invalid request or transition", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Appointment not found", body = ErrorSchema),
        (status = 409, description = "Concurrent modification", body = ErrorSchema)
    ),
    tags = ["appointments"],
    operation_id = "updateAppointment"
)]
#[patch("/appointments/{id}")]
pub async fn update_appointment(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UpdateAppointmentBody>,
) -> ApiResult<web::Json<AppointmentBody>> {
    let changes = AppointmentChanges::try_from(payload.into_inner())?;
    let appointment = state
        .appointments
        .update(AppointmentId::new(path.into_inner()), changes)
        .await?;
    Ok(web::Json(appointment.into()))
}

/// Delete an appointment.
#[utoipa::path(
    delete,
    path = "/appointments/{id}",
    params(("id" = i32, Path, description = "Appointment identifier")),
    responses(
        (status = 204, description = "Appointment deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Appointment not found", body = ErrorSchema)
    ),
    tags = ["appointments"],
    operation_id = "deleteAppointment"
)]
#[delete("/appointments/{id}")]
pub async fn delete_appointment(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state
        .appointments
        .remove(AppointmentId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
