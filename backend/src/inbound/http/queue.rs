//! Walk-in queue HTTP handlers.
//!
//! ```text
//! GET    /queue?status=waiting
//! POST   /queue {"patientId":1}
//! GET    /queue/{id}
//! PATCH  /queue/{id} {"status":"with_doctor"}
//! DELETE /queue/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{ApiResult, Error, PatientId, QueueEntryId, QueueStatus};
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::dto::QueueEntryBody;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_status};

const STATUS: FieldName = FieldName::new("status");
const STATUSES: [&str; 3] = ["waiting", "with_doctor", "completed"];

fn parse_queue_status(raw: &str) -> Result<QueueStatus, Error> {
    parse_status(raw, STATUS, &STATUSES)
}

/// Optional status filter for `GET /queue`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QueueFilter {
    /// One of `waiting`, `with_doctor` or `completed`.
    pub status: Option<String>,
}

/// Request payload for adding a patient to the queue.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQueueEntryBody {
    #[schema(example = 1)]
    pub patient_id: i32,
    /// Defaults to `waiting`.
    #[schema(example = "waiting")]
    pub status: Option<String>,
}

/// Status change for a queue entry.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateQueueEntryBody {
    #[schema(example = "with_doctor")]
    pub status: String,
}

/// List queue entries by number, optionally filtered by status.
#[utoipa::path(
    get,
    path = "/queue",
    params(QueueFilter),
    responses(
        (status = 200, description = "Queue ordered by number", body = [QueueEntryBody]),
        (status = 400, description = "Unknown status filter", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["queue"],
    operation_id = "listQueue"
)]
#[get("/queue")]
pub async fn list_queue(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    query: web::Query<QueueFilter>,
) -> ApiResult<web::Json<Vec<QueueEntryBody>>> {
    let status = query
        .status
        .as_deref()
        .map(parse_queue_status)
        .transpose()?;
    let entries = state.queue.list(status).await?;
    Ok(web::Json(entries.into_iter().map(QueueEntryBody::from).collect()))
}

/// Add a patient to the queue with the next queue number.
#[utoipa::path(
    post,
    path = "/queue",
    request_body = CreateQueueEntryBody,
    responses(
        (status = 201, description = "Patient queued", body = QueueEntryBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Patient not found", body = ErrorSchema)
    ),
    tags = ["queue"],
    operation_id = "createQueueEntry"
)]
#[post("/queue")]
pub async fn create_queue_entry(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    payload: web::Json<CreateQueueEntryBody>,
) -> ApiResult<HttpResponse> {
    let CreateQueueEntryBody { patient_id, status } = payload.into_inner();
    let status = status.as_deref().map(parse_queue_status).transpose()?;
    let entry = state
        .queue
        .enqueue(PatientId::new(patient_id), status)
        .await?;
    Ok(HttpResponse::Created().json(QueueEntryBody::from(entry)))
}

/// Fetch one queue entry.
#[utoipa::path(
    get,
    path = "/queue/{id}",
    params(("id" = i32, Path, description = "Queue entry identifier")),
    responses(
        (status = 200, description = "Queue entry", body = QueueEntryBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Queue item not found", body = ErrorSchema)
    ),
    tags = ["queue"],
    operation_id = "getQueueEntry"
)]
#[get("/queue/{id}")]
pub async fn get_queue_entry(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<QueueEntryBody>> {
    let entry = state.queue.get(QueueEntryId::new(path.into_inner())).await?;
    Ok(web::Json(entry.into()))
}

/// Move a queue entry through `waiting`, `with_doctor` and `completed`.
#[utoipa::path(
    patch,
    path = "/queue/{id}",
    params(("id" = i32, Path, description = "Queue entry identifier")),
    request_body = UpdateQueueEntryBody,
    responses(
        (status = 200, description = "Updated entry", body = QueueEntryBody),
        (status = 400, description = "Invalid status or transition", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Queue item not found", body = ErrorSchema),
        (status = 409, description = "Concurrent modification", body = ErrorSchema)
    ),
    tags = ["queue"],
    operation_id = "updateQueueEntry"
)]
#[patch("/queue/{id}")]
pub async fn update_queue_entry(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UpdateQueueEntryBody>,
) -> ApiResult<web::Json<QueueEntryBody>> {
    let status = parse_queue_status(&payload.status)?;
    let entry = state
        .queue
        .update_status(QueueEntryId::new(path.into_inner()), status)
        .await?;
    Ok(web::Json(entry.into()))
}

/// Remove an entry from the queue.
#[utoipa::path(
    delete,
    path = "/queue/{id}",
    params(("id" = i32, Path, description = "Queue entry identifier")),
    responses(
        (status = 204, description = "Queue entry removed"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Queue item not found", body = ErrorSchema)
    ),
    tags = ["queue"],
    operation_id = "deleteQueueEntry"
)]
#[delete("/queue/{id}")]
pub async fn delete_queue_entry(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state
        .queue
        .remove(QueueEntryId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
