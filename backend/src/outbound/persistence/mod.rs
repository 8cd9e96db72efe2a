//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the clinic repository ports backed by
//! PostgreSQL via `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Lifecycle rules live in the domain services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: every Diesel and pool failure is mapped to
//!   [`RepositoryError`](crate::domain::ports::RepositoryError).
//!
//! # Example
//!
//! ```no_run
//! use frontdesk::outbound::persistence::{DbPool, DieselPatientRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/frontdesk")).await?;
//! let patients = DieselPatientRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_appointment_repository;
mod diesel_doctor_repository;
mod diesel_patient_repository;
mod diesel_queue_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_appointment_repository::DieselAppointmentRepository;
pub use diesel_doctor_repository::DieselDoctorRepository;
pub use diesel_patient_repository::DieselPatientRepository;
pub use diesel_queue_repository::DieselQueueRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
