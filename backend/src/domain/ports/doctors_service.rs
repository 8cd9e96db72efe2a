//! Driving port for the doctor roster.

use async_trait::async_trait;

use crate::domain::{Doctor, DoctorChanges, DoctorDraft, DoctorId, Error};

/// Doctor use-cases called by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DoctorsService: Send + Sync {
    async fn create(&self, draft: DoctorDraft) -> Result<Doctor, Error>;

    async fn list(&self) -> Result<Vec<Doctor>, Error>;

    async fn get(&self, id: DoctorId) -> Result<Doctor, Error>;

    async fn update(&self, id: DoctorId, changes: DoctorChanges) -> Result<Doctor, Error>;

    /// Hard delete. Fails with `conflict` while appointments reference the doctor.
    async fn remove(&self, id: DoctorId) -> Result<(), Error>;
}
