//! Port for patient persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{NewPatient, Patient, PatientId, PatientProfile};

use super::RepositoryError;

/// Port for storing and reading patient records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Insert a patient and return the stored record.
    async fn create(&self, patient: &NewPatient) -> Result<Patient, RepositoryError>;

    /// All patients ordered by id.
    async fn list(&self) -> Result<Vec<Patient>, RepositoryError>;

    /// Find a patient by id.
    async fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>, RepositoryError>;

    /// Overwrite the profile of an existing patient; `None` when absent.
    async fn update(
        &self,
        id: PatientId,
        profile: &PatientProfile,
    ) -> Result<Option<Patient>, RepositoryError>;

    /// Delete a patient. Returns `false` when no row matched.
    ///
    /// Fails with [`RepositoryError::StillReferenced`] while appointments or
    /// queue entries point at the patient.
    async fn delete(&self, id: PatientId) -> Result<bool, RepositoryError>;

    /// Count patients created within `[from, to)`.
    async fn count_created_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<u64, RepositoryError>;
}
