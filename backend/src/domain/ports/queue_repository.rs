//! Port for the walk-in queue.

use async_trait::async_trait;

use crate::domain::{NewQueueEntry, QueueEntry, QueueEntryId, QueueStatus};

use super::RepositoryError;

/// Port for allocating and reading queue entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueueRepository: Send + Sync {
    /// Insert an entry numbered one above the highest stored number, or 1.
    ///
    /// Reading the maximum and inserting happen as one atomic step, so
    /// concurrent callers always receive distinct numbers.
    async fn enqueue(&self, entry: &NewQueueEntry) -> Result<QueueEntry, RepositoryError>;

    /// Entries ordered by queue number, optionally restricted to one status.
    async fn list(&self, status: Option<QueueStatus>) -> Result<Vec<QueueEntry>, RepositoryError>;

    /// Find an entry by id.
    async fn find_by_id(&self, id: QueueEntryId) -> Result<Option<QueueEntry>, RepositoryError>;

    /// Set the status only if it still equals `expected`.
    ///
    /// Returns `None` when the entry is absent or its status changed since it
    /// was read.
    async fn update_status(
        &self,
        id: QueueEntryId,
        expected: QueueStatus,
        next: QueueStatus,
    ) -> Result<Option<QueueEntry>, RepositoryError>;

    /// Delete an entry. Returns `false` when no row matched.
    async fn delete(&self, id: QueueEntryId) -> Result<bool, RepositoryError>;
}
