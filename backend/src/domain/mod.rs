//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed clinic entities and the use-cases that act
//! on them. Nothing here knows about HTTP or SQL; adapters reach the domain
//! through the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and its stable identifier.
//! - Patient, Doctor, Appointment, QueueEntry, User: persisted entities.
//! - `*ServiceImpl` / `DashboardQueryService`: driving port implementations.

pub mod appointment;
mod appointments_service;
pub mod auth;
pub mod dashboard;
mod dashboard_service;
pub mod doctor;
mod doctors_service;
pub mod error;
pub mod ids;
mod login_service;
pub mod patient;
mod patients_service;
pub mod ports;
pub mod queue;
mod queue_service;
pub(crate) mod service_support;
pub mod trace_id;
pub mod user;
mod users_service;

pub use self::appointment::{
    Appointment, AppointmentChanges, AppointmentSchedule, AppointmentStatus,
    AppointmentTransitionError, NewAppointment, UnknownAppointmentStatus,
};
pub use self::appointments_service::AppointmentsServiceImpl;
pub use self::auth::{AuthenticatedIdentity, IssuedToken, LoginCredentials, LoginValidationError};
pub use self::dashboard::{DashboardSnapshot, DoctorAvailability};
pub use self::dashboard_service::DashboardQueryService;
pub use self::doctor::{
    Doctor, DoctorChanges, DoctorDraft, DoctorProfile, DoctorValidationError,
};
pub use self::doctors_service::DoctorsServiceImpl;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::ids::{AppointmentId, DoctorId, PatientId, QueueEntryId, UserId};
pub use self::login_service::LoginServiceImpl;
pub use self::patient::{
    NewPatient, Patient, PatientChanges, PatientProfile, PatientValidationError,
};
pub use self::patients_service::PatientsServiceImpl;
pub use self::queue::{
    NewQueueEntry, QueueEntry, QueueStatus, QueueTransitionError, UnknownQueueStatus,
};
pub use self::queue_service::QueueServiceImpl;
pub use self::trace_id::TraceId;
pub use self::user::{
    EmailAddress, NewUser, Password, User, UserChanges, UserCredentialsRecord,
    UserValidationError, normalize_user_name,
};
pub use self::users_service::UsersServiceImpl;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use frontdesk::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Patient not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
