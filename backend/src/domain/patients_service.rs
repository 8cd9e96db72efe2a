//! Patient domain service implementing the [`PatientsService`] driving port.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{CreatePatientRequest, PatientRepository, PatientsService, RepositoryError};
use crate::domain::service_support::{invalid_field, map_repository_error};
use crate::domain::{
    Error, NewPatient, Patient, PatientChanges, PatientId, PatientProfile, PatientValidationError,
};

const PATIENT_NOT_FOUND: &str = "Patient not found";

fn map_validation_error(error: PatientValidationError) -> Error {
    match error {
        PatientValidationError::EmptyName => invalid_field("name", "empty_name", error.to_string()),
    }
}

/// Patient service backed by a [`PatientRepository`].
#[derive(Clone)]
pub struct PatientsServiceImpl<R> {
    patients: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> PatientsServiceImpl<R> {
    /// Create the service; `clock` stamps `created_at` on new patients.
    pub fn new(patients: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { patients, clock }
    }
}

#[async_trait]
impl<R> PatientsService for PatientsServiceImpl<R>
where
    R: PatientRepository,
{
    async fn create(&self, request: CreatePatientRequest) -> Result<Patient, Error> {
        let profile = PatientProfile::try_new(&request.name, request.phone.as_deref())
            .map_err(map_validation_error)?;
        let patient = self
            .patients
            .create(&NewPatient {
                profile,
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_repository_error)?;
        info!(patient_id = %patient.id, "patient registered");
        Ok(patient)
    }

    async fn list(&self) -> Result<Vec<Patient>, Error> {
        self.patients.list().await.map_err(map_repository_error)
    }

    async fn get(&self, id: PatientId) -> Result<Patient, Error> {
        self.patients
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(PATIENT_NOT_FOUND))
    }

    async fn update(&self, id: PatientId, changes: PatientChanges) -> Result<Patient, Error> {
        let current = self.get(id).await?;
        let profile = changes.apply_to(&current).map_err(map_validation_error)?;
        self.patients
            .update(id, &profile)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(PATIENT_NOT_FOUND))
    }

    async fn remove(&self, id: PatientId) -> Result<(), Error> {
        let deleted = self.patients.delete(id).await.map_err(|err| match err {
            RepositoryError::StillReferenced { .. } => Error::conflict(
                "Patient is referenced by appointments or queue entries",
            ),
            other => map_repository_error(other),
        })?;
        if deleted {
            info!(patient_id = %id, "patient deleted");
            Ok(())
        } else {
            Err(Error::not_found(PATIENT_NOT_FOUND))
        }
    }
}

#[cfg(test)]
#[path = "patients_service_tests.rs"]
mod tests;
