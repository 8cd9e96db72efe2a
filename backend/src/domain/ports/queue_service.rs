//! Driving port for the walk-in queue.

use async_trait::async_trait;

use crate::domain::{Error, PatientId, QueueEntry, QueueEntryId, QueueStatus};

/// Queue use-cases called by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueueService: Send + Sync {
    /// Add a patient to the queue with the next number.
    ///
    /// `status` defaults to `waiting`. Fails with `not_found` when the
    /// patient does not exist.
    async fn enqueue(
        &self,
        patient_id: PatientId,
        status: Option<QueueStatus>,
    ) -> Result<QueueEntry, Error>;

    /// Entries by ascending queue number, optionally filtered by status.
    async fn list(&self, status: Option<QueueStatus>) -> Result<Vec<QueueEntry>, Error>;

    async fn get(&self, id: QueueEntryId) -> Result<QueueEntry, Error>;

    /// Move an entry to `status` if the transition is allowed.
    async fn update_status(&self, id: QueueEntryId, status: QueueStatus)
    -> Result<QueueEntry, Error>;

    async fn remove(&self, id: QueueEntryId) -> Result<(), Error>;
}
