//! Doctor domain service implementing the [`DoctorsService`] driving port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{DoctorRepository, DoctorsService, RepositoryError};
use crate::domain::service_support::{invalid_field, map_repository_error};
use crate::domain::{
    Doctor, DoctorChanges, DoctorDraft, DoctorId, DoctorProfile, DoctorValidationError, Error,
};

const DOCTOR_NOT_FOUND: &str = "Doctor not found";

fn map_validation_error(error: DoctorValidationError) -> Error {
    let (field, code) = match error {
        DoctorValidationError::EmptyName => ("name", "empty_name"),
        DoctorValidationError::InvertedAvailability => ("available_from", "inverted_availability"),
    };
    invalid_field(field, code, error.to_string())
}

/// Doctor service backed by a [`DoctorRepository`].
#[derive(Clone)]
pub struct DoctorsServiceImpl<R> {
    doctors: Arc<R>,
}

impl<R> DoctorsServiceImpl<R> {
    /// Create the service over a doctor repository.
    pub fn new(doctors: Arc<R>) -> Self {
        Self { doctors }
    }
}

#[async_trait]
impl<R> DoctorsService for DoctorsServiceImpl<R>
where
    R: DoctorRepository,
{
    async fn create(&self, draft: DoctorDraft) -> Result<Doctor, Error> {
        let profile = DoctorProfile::try_from(draft).map_err(map_validation_error)?;
        let doctor = self
            .doctors
            .create(&profile)
            .await
            .map_err(map_repository_error)?;
        info!(doctor_id = %doctor.id, "doctor added");
        Ok(doctor)
    }

    async fn list(&self) -> Result<Vec<Doctor>, Error> {
        self.doctors.list().await.map_err(map_repository_error)
    }

    async fn get(&self, id: DoctorId) -> Result<Doctor, Error> {
        self.doctors
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(DOCTOR_NOT_FOUND))
    }

    async fn update(&self, id: DoctorId, changes: DoctorChanges) -> Result<Doctor, Error> {
        let current = self.get(id).await?;
        let profile = changes.apply_to(&current).map_err(map_validation_error)?;
        self.doctors
            .update(id, &profile)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(DOCTOR_NOT_FOUND))
    }

    async fn remove(&self, id: DoctorId) -> Result<(), Error> {
        let deleted = self.doctors.delete(id).await.map_err(|err| match err {
            RepositoryError::StillReferenced { .. } => {
                Error::conflict("Doctor is referenced by appointments")
            }
            other => map_repository_error(other),
        })?;
        if deleted {
            info!(doctor_id = %id, "doctor deleted");
            Ok(())
        } else {
            Err(Error::not_found(DOCTOR_NOT_FOUND))
        }
    }
}
