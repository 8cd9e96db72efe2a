//! Driving port for appointment booking.

use async_trait::async_trait;

use crate::domain::{Appointment, AppointmentChanges, AppointmentId, Error, NewAppointment};

/// Appointment use-cases called by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentsService: Send + Sync {
    /// Book a slot. Fails with `not_found` when the patient or doctor is
    /// missing; the patient is checked first.
    async fn book(&self, request: NewAppointment) -> Result<Appointment, Error>;

    /// All appointments by date, then time.
    async fn list(&self) -> Result<Vec<Appointment>, Error>;

    async fn get(&self, id: AppointmentId) -> Result<Appointment, Error>;

    /// Apply a partial update under the booking lifecycle rules.
    async fn update(
        &self,
        id: AppointmentId,
        changes: AppointmentChanges,
    ) -> Result<Appointment, Error>;

    async fn remove(&self, id: AppointmentId) -> Result<(), Error>;
}
