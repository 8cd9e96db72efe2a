//! Walk-in queue service implementing the [`QueueService`] driving port.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{PatientRepository, QueueRepository, QueueService};
use crate::domain::service_support::{invalid_field, map_repository_error};
use crate::domain::{
    Error, NewQueueEntry, PatientId, QueueEntry, QueueEntryId, QueueStatus, QueueTransitionError,
};

const QUEUE_ENTRY_NOT_FOUND: &str = "Queue item not found";

fn map_transition_error(error: QueueTransitionError) -> Error {
    invalid_field("status", "invalid_transition", error.to_string())
}

/// Queue service; numbering is delegated to [`QueueRepository::enqueue`].
#[derive(Clone)]
pub struct QueueServiceImpl<Q, P> {
    queue: Arc<Q>,
    patients: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<Q, P> QueueServiceImpl<Q, P> {
    /// Create the service; `clock` stamps new queue entries.
    pub fn new(queue: Arc<Q>, patients: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            queue,
            patients,
            clock,
        }
    }
}

#[async_trait]
impl<Q, P> QueueService for QueueServiceImpl<Q, P>
where
    Q: QueueRepository,
    P: PatientRepository,
{
    async fn enqueue(
        &self,
        patient_id: PatientId,
        status: Option<QueueStatus>,
    ) -> Result<QueueEntry, Error> {
        self.patients
            .find_by_id(patient_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("Patient not found"))?;

        let entry = self
            .queue
            .enqueue(&NewQueueEntry {
                patient_id,
                status: status.unwrap_or_default(),
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_repository_error)?;
        info!(
            queue_entry_id = %entry.id,
            queue_number = entry.queue_number,
            %patient_id,
            "patient added to queue"
        );
        Ok(entry)
    }

    async fn list(&self, status: Option<QueueStatus>) -> Result<Vec<QueueEntry>, Error> {
        self.queue.list(status).await.map_err(map_repository_error)
    }

    async fn get(&self, id: QueueEntryId) -> Result<QueueEntry, Error> {
        self.queue
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(QUEUE_ENTRY_NOT_FOUND))
    }

    async fn update_status(
        &self,
        id: QueueEntryId,
        status: QueueStatus,
    ) -> Result<QueueEntry, Error> {
        let current = self.get(id).await?;
        let next = current.transition(status).map_err(map_transition_error)?;
        if next == current.status {
            return Ok(current);
        }

        let updated = self
            .queue
            .update_status(id, current.status, next)
            .await
            .map_err(map_repository_error)?;
        match updated {
            Some(entry) => {
                info!(queue_entry_id = %id, status = %entry.status, "queue entry updated");
                Ok(entry)
            }
            None => match self.queue.find_by_id(id).await.map_err(map_repository_error)? {
                Some(_) => Err(Error::conflict(
                    "Queue item was modified by another request; reload and retry",
                )),
                None => Err(Error::not_found(QUEUE_ENTRY_NOT_FOUND)),
            },
        }
    }

    async fn remove(&self, id: QueueEntryId) -> Result<(), Error> {
        if self.queue.delete(id).await.map_err(map_repository_error)? {
            info!(queue_entry_id = %id, "queue entry deleted");
            Ok(())
        } else {
            Err(Error::not_found(QUEUE_ENTRY_NOT_FOUND))
        }
    }
}

#[cfg(test)]
#[path = "queue_service_tests.rs"]
mod tests;
