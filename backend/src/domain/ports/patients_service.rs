//! Driving port for patient registration and maintenance.

use async_trait::async_trait;

use crate::domain::{Error, Patient, PatientChanges, PatientId};

/// Raw create payload; validated by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePatientRequest {
    pub name: String,
    pub phone: Option<String>,
}

/// Patient use-cases called by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PatientsService: Send + Sync {
    async fn create(&self, request: CreatePatientRequest) -> Result<Patient, Error>;

    async fn list(&self) -> Result<Vec<Patient>, Error>;

    /// Fails with `not_found` when absent.
    async fn get(&self, id: PatientId) -> Result<Patient, Error>;

    /// Merge `changes` onto the stored patient.
    async fn update(&self, id: PatientId, changes: PatientChanges) -> Result<Patient, Error>;

    /// Hard delete. Fails with `conflict` while the patient is referenced.
    async fn remove(&self, id: PatientId) -> Result<(), Error>;
}
