//! Front-desk dashboard read model.

use chrono::{DateTime, Utc};

use super::{Doctor, QueueEntry};

/// A doctor annotated with whether they are on shift right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorAvailability {
    pub doctor: Doctor,
    pub available_now: bool,
}

/// Snapshot of doctors, the live queue and today's admissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub doctors: Vec<DoctorAvailability>,
    pub queue: Vec<QueueEntry>,
    pub patients_admitted_today: u64,
}
