//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, hashing, tokens) describe what the domain
//! needs from infrastructure. Driving ports (the `*Service` and query traits)
//! are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod appointment_repository;
mod appointments_service;
mod credential_hasher;
mod dashboard_query;
mod doctor_repository;
mod doctors_service;
mod login_service;
mod patient_repository;
mod patients_service;
mod queue_repository;
mod queue_service;
mod repository_error;
mod token_service;
mod user_repository;
mod users_service;

pub use appointment_repository::AppointmentRepository;
#[cfg(test)]
pub use appointment_repository::MockAppointmentRepository;
pub use appointments_service::AppointmentsService;
#[cfg(test)]
pub use appointments_service::MockAppointmentsService;
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHashError, CredentialHasher};
pub use dashboard_query::DashboardQuery;
#[cfg(test)]
pub use dashboard_query::MockDashboardQuery;
pub use doctor_repository::DoctorRepository;
#[cfg(test)]
pub use doctor_repository::MockDoctorRepository;
pub use doctors_service::DoctorsService;
#[cfg(test)]
pub use doctors_service::MockDoctorsService;
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use patient_repository::MockPatientRepository;
pub use patient_repository::PatientRepository;
#[cfg(test)]
pub use patients_service::MockPatientsService;
pub use patients_service::{CreatePatientRequest, PatientsService};
#[cfg(test)]
pub use queue_repository::MockQueueRepository;
pub use queue_repository::QueueRepository;
#[cfg(test)]
pub use queue_service::MockQueueService;
pub use queue_service::QueueService;
pub use repository_error::RepositoryError;
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
#[cfg(test)]
pub use users_service::MockUsersService;
pub use users_service::{RegisterUserRequest, UpdateUserRequest, UsersService};

#[cfg(test)]
mod tests;
