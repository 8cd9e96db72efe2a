//! Dashboard aggregation implementing the [`DashboardQuery`] port.
//!
//! Availability and "today" are both evaluated in UTC against the injected
//! clock so a snapshot is consistent within itself.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Days, NaiveTime};
use mockable::Clock;

use crate::domain::ports::{DashboardQuery, DoctorRepository, PatientRepository, QueueRepository};
use crate::domain::service_support::map_repository_error;
use crate::domain::{DashboardSnapshot, DoctorAvailability, Error};

/// Read-only dashboard built from the doctor, queue and patient stores.
#[derive(Clone)]
pub struct DashboardQueryService<D, Q, P> {
    doctors: Arc<D>,
    queue: Arc<Q>,
    patients: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<D, Q, P> DashboardQueryService<D, Q, P> {
    /// Create the service; `clock` decides availability and "today".
    pub fn new(doctors: Arc<D>, queue: Arc<Q>, patients: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            doctors,
            queue,
            patients,
            clock,
        }
    }
}

#[async_trait]
impl<D, Q, P> DashboardQuery for DashboardQueryService<D, Q, P>
where
    D: DoctorRepository,
    Q: QueueRepository,
    P: PatientRepository,
{
    async fn snapshot(&self) -> Result<DashboardSnapshot, Error> {
        let now = self.clock.utc();
        let time_of_day = now.time();

        let doctors = self
            .doctors
            .list()
            .await
            .map_err(map_repository_error)?
            .into_iter()
            .map(|doctor| DoctorAvailability {
                available_now: doctor.is_available_at(time_of_day),
                doctor,
            })
            .collect();

        let queue = self.queue.list(None).await.map_err(map_repository_error)?;

        let start_of_day = now.date_naive().and_time(NaiveTime::MIN).and_utc();
        let end_of_day = start_of_day
            .checked_add_days(Days::new(1))
            .ok_or_else(|| Error::internal("dashboard date out of range"))?;
        let patients_admitted_today = self
            .patients
            .count_created_between(start_of_day, end_of_day)
            .await
            .map_err(map_repository_error)?;

        Ok(DashboardSnapshot {
            generated_at: now,
            doctors,
            queue,
            patients_admitted_today,
        })
    }
}
