//! Port for doctor persistence.

use async_trait::async_trait;

use crate::domain::{Doctor, DoctorId, DoctorProfile};

use super::RepositoryError;

/// Port for storing and reading doctor records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DoctorRepository: Send + Sync {
    /// Insert a doctor and return the stored record.
    async fn create(&self, profile: &DoctorProfile) -> Result<Doctor, RepositoryError>;

    /// All doctors ordered by id.
    async fn list(&self) -> Result<Vec<Doctor>, RepositoryError>;

    /// Find a doctor by id.
    async fn find_by_id(&self, id: DoctorId) -> Result<Option<Doctor>, RepositoryError>;

    /// Overwrite an existing doctor; `None` when absent.
    async fn update(
        &self,
        id: DoctorId,
        profile: &DoctorProfile,
    ) -> Result<Option<Doctor>, RepositoryError>;

    /// Delete a doctor. Returns `false` when no row matched.
    ///
    /// Fails with [`RepositoryError::StillReferenced`] while appointments
    /// point at the doctor.
    async fn delete(&self, id: DoctorId) -> Result<bool, RepositoryError>;
}
