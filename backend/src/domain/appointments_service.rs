//! Appointment domain service implementing the [`AppointmentsService`] port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    AppointmentRepository, AppointmentsService, DoctorRepository, PatientRepository,
};
use crate::domain::service_support::{invalid_field, map_repository_error};
use crate::domain::{
    Appointment, AppointmentChanges, AppointmentId, AppointmentTransitionError, Error,
    NewAppointment,
};

const APPOINTMENT_NOT_FOUND: &str = "Appointment not found";

fn map_transition_error(error: AppointmentTransitionError) -> Error {
    let (field, code) = match error {
        AppointmentTransitionError::StatusChange { .. } => ("status", "invalid_transition"),
        AppointmentTransitionError::Reschedule { .. } => ("date", "appointment_closed"),
    };
    invalid_field(field, code, error.to_string())
}

/// Appointment service; checks referenced patients and doctors on booking.
#[derive(Clone)]
pub struct AppointmentsServiceImpl<A, P, D> {
    appointments: Arc<A>,
    patients: Arc<P>,
    doctors: Arc<D>,
}

impl<A, P, D> AppointmentsServiceImpl<A, P, D> {
    /// Create the service; patients and doctors are checked on booking.
    pub fn new(appointments: Arc<A>, patients: Arc<P>, doctors: Arc<D>) -> Self {
        Self {
            appointments,
            patients,
            doctors,
        }
    }
}

#[async_trait]
impl<A, P, D> AppointmentsService for AppointmentsServiceImpl<A, P, D>
where
    A: AppointmentRepository,
    P: PatientRepository,
    D: DoctorRepository,
{
    async fn book(&self, request: NewAppointment) -> Result<Appointment, Error> {
        self.patients
            .find_by_id(request.patient_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("Patient not found"))?;
        self.doctors
            .find_by_id(request.doctor_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("Doctor not found"))?;

        let appointment = self
            .appointments
            .create(&request)
            .await
            .map_err(map_repository_error)?;
        info!(
            appointment_id = %appointment.id,
            patient_id = %request.patient_id,
            doctor_id = %request.doctor_id,
            "appointment booked"
        );
        Ok(appointment)
    }

    async fn list(&self) -> Result<Vec<Appointment>, Error> {
        self.appointments.list().await.map_err(map_repository_error)
    }

    async fn get(&self, id: AppointmentId) -> Result<Appointment, Error> {
        self.appointments
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(APPOINTMENT_NOT_FOUND))
    }

    async fn update(
        &self,
        id: AppointmentId,
        changes: AppointmentChanges,
    ) -> Result<Appointment, Error> {
        let current = self.get(id).await?;
        let schedule = current.apply(changes).map_err(map_transition_error)?;
        if schedule == current.schedule() {
            return Ok(current);
        }

        let updated = self
            .appointments
            .update_schedule(id, current.status, &schedule)
            .await
            .map_err(map_repository_error)?;
        match updated {
            Some(appointment) => {
                info!(appointment_id = %id, status = %appointment.status, "appointment updated");
                Ok(appointment)
            }
            // Either deleted or changed by another request since it was read.
            None => match self.appointments.find_by_id(id).await.map_err(map_repository_error)? {
                Some(_) => Err(Error::conflict(
                    "Appointment was modified by another request; reload and retry",
                )),
                None => Err(Error::not_found(APPOINTMENT_NOT_FOUND)),
            },
        }
    }

    async fn remove(&self, id: AppointmentId) -> Result<(), Error> {
        if self
            .appointments
            .delete(id)
            .await
            .map_err(map_repository_error)?
        {
            info!(appointment_id = %id, "appointment deleted");
            Ok(())
        } else {
            Err(Error::not_found(APPOINTMENT_NOT_FOUND))
        }
    }
}

#[cfg(test)]
#[path = "appointments_service_tests.rs"]
mod tests;
