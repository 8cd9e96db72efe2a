//! Port for appointment persistence.

use async_trait::async_trait;

use crate::domain::{
    Appointment, AppointmentId, AppointmentSchedule, AppointmentStatus, NewAppointment,
};

use super::RepositoryError;

/// Port for booking and reading appointments.
///
/// Reads return appointments with their patient and doctor loaded.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Insert a `booked` appointment.
    ///
    /// Fails with [`RepositoryError::MissingReference`] when the patient or
    /// doctor disappeared after it was checked.
    async fn create(&self, appointment: &NewAppointment) -> Result<Appointment, RepositoryError>;

    /// All appointments ordered by date, then time, then id.
    async fn list(&self) -> Result<Vec<Appointment>, RepositoryError>;

    /// Find an appointment by id.
    async fn find_by_id(&self, id: AppointmentId) -> Result<Option<Appointment>, RepositoryError>;

    /// Write `schedule` only if the stored status still equals `expected`.
    ///
    /// Returns `None` when the appointment is absent or its status changed
    /// since it was read.
    async fn update_schedule(
        &self,
        id: AppointmentId,
        expected: AppointmentStatus,
        schedule: &AppointmentSchedule,
    ) -> Result<Option<Appointment>, RepositoryError>;

    /// Delete an appointment. Returns `false` when no row matched.
    async fn delete(&self, id: AppointmentId) -> Result<bool, RepositoryError>;
}
