//! Walk-in queue entries.
//!
//! Queue numbers are allocated by the store as one more than the highest
//! number currently held by any entry, regardless of status, so they strictly
//! increase in creation order.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::{Patient, PatientId, QueueEntryId};

/// Position of a patient in the walk-in flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QueueStatus {
    #[default]
    Waiting,
    WithDoctor,
    Completed,
}

impl QueueStatus {
    /// Wire and storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::WithDoctor => "with_doctor",
            Self::Completed => "completed",
        }
    }

    /// Whether moving from `self` to `next` is allowed.
    ///
    /// A patient with the doctor may be sent back to waiting; `completed` is
    /// terminal.
    ///
    /// # Examples
    /// ```
    /// use frontdesk::domain::QueueStatus;
    ///
    /// assert!(QueueStatus::WithDoctor.can_transition_to(QueueStatus::Waiting));
    /// assert!(!QueueStatus::Completed.can_transition_to(QueueStatus::Waiting));
    /// ```
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Waiting, _)
                | (Self::WithDoctor, _)
                | (Self::Completed, Self::Completed)
        )
    }
}

impl fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when parsing an unknown queue status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown queue status: {0}")]
pub struct UnknownQueueStatus(pub String);

impl FromStr for QueueStatus {
    type Err = UnknownQueueStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" => Ok(Self::Waiting),
            "with_doctor" => Ok(Self::WithDoctor),
            "completed" => Ok(Self::Completed),
            other => Err(UnknownQueueStatus(other.to_owned())),
        }
    }
}

/// A persisted queue entry with its patient loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    pub id: QueueEntryId,
    pub patient: Patient,
    pub queue_number: i32,
    pub status: QueueStatus,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a queue entry; the number is assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQueueEntry {
    pub patient_id: PatientId,
    pub status: QueueStatus,
    pub created_at: DateTime<Utc>,
}

/// Rejected queue status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("queue entry cannot move from {from} to {to}")]
pub struct QueueTransitionError {
    pub from: QueueStatus,
    pub to: QueueStatus,
}

impl QueueEntry {
    /// Validate a move to `next`.
    pub fn transition(&self, next: QueueStatus) -> Result<QueueStatus, QueueTransitionError> {
        if self.status.can_transition_to(next) {
            Ok(next)
        } else {
            Err(QueueTransitionError {
                from: self.status,
                to: next,
            })
        }
    }
}
