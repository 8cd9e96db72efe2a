//! Front-desk dashboard handler.
//!
//! ```text
//! GET /dashboard
//! ```

use actix_web::{get, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{ApiResult, DashboardSnapshot, DoctorAvailability};
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::dto::{DoctorBody, QueueEntryBody};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Doctor with a flag telling whether they are on duty right now.
#[derive(Debug, Serialize, ToSchema)]
pub struct DoctorAvailabilityBody {
    pub doctor: DoctorBody,
    pub available_now: bool,
}

impl From<DoctorAvailability> for DoctorAvailabilityBody {
    fn from(value: DoctorAvailability) -> Self {
        Self {
            doctor: value.doctor.into(),
            available_now: value.available_now,
        }
    }
}

/// Aggregated front-desk view.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardBody {
    pub generated_at: DateTime<Utc>,
    pub doctors: Vec<DoctorAvailabilityBody>,
    pub queue: Vec<QueueEntryBody>,
    /// Patients registered on the current UTC date.
    #[schema(example = 4)]
    pub patients_admitted_today: u64,
}

impl From<DashboardSnapshot> for DashboardBody {
    fn from(value: DashboardSnapshot) -> Self {
        Self {
            generated_at: value.generated_at,
            doctors: value
                .doctors
                .into_iter()
                .map(DoctorAvailabilityBody::from)
                .collect(),
            queue: value.queue.into_iter().map(QueueEntryBody::from).collect(),
            patients_admitted_today: value.patients_admitted_today,
        }
    }
}

/// Doctors with availability, the queue and today's new patients.
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Dashboard snapshot", body = DashboardBody),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["dashboard"],
    operation_id = "getDashboard"
)]
#[get("/dashboard")]
pub async fn get_dashboard(
    _user: AuthenticatedUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<DashboardBody>> {
    let snapshot = state.dashboard.snapshot().await?;
    Ok(web::Json(snapshot.into()))
}
