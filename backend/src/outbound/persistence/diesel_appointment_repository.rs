//! PostgreSQL-backed `AppointmentRepository` implementation using Diesel ORM.
//!
//! Reads join `patients` and `doctors` so every appointment is returned with
//! its related records in one round trip.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{AppointmentRepository, RepositoryError};
use crate::domain::{
    Appointment, AppointmentId, AppointmentSchedule, AppointmentStatus, NewAppointment,
};

use super::error_mapping::{map_delete_error, map_pool_error, map_write_error};
use super::models::{
    AppointmentJoinRow, AppointmentRow, AppointmentScheduleUpdate, DoctorRow, NewAppointmentRow,
    PatientRow, appointment_from_join,
};
use super::pool::DbPool;
use super::schema::{appointments, doctors, patients};

/// Diesel-backed implementation of the [`AppointmentRepository`] port.
#[derive(Clone)]
pub struct DieselAppointmentRepository {
    pool: DbPool,
}

impl DieselAppointmentRepository {
    /// Create a repository backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

async fn load_one(
    conn: &mut AsyncPgConnection,
    id: i32,
) -> Result<Option<Appointment>, RepositoryError> {
    let row: Option<AppointmentJoinRow> = appointments::table
        .inner_join(patients::table)
        .inner_join(doctors::table)
        .filter(appointments::id.eq(id))
        .select((
            AppointmentRow::as_select(),
            PatientRow::as_select(),
            DoctorRow::as_select(),
        ))
        .first(conn)
        .await
        .optional()
        .map_err(map_write_error)?;
    row.map(appointment_from_join).transpose()
}

/// Load a row that was written on this connection a moment ago.
async fn load_written(
    conn: &mut AsyncPgConnection,
    id: i32,
) -> Result<Appointment, RepositoryError> {
    load_one(conn, id)
        .await?
        .ok_or_else(|| RepositoryError::query("appointment vanished after write"))
}

#[async_trait]
impl AppointmentRepository for DieselAppointmentRepository {
    async fn create(&self, appointment: &NewAppointment) -> Result<Appointment, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id: i32 = diesel::insert_into(appointments::table)
            .values(&NewAppointmentRow {
                patient_id: appointment.patient_id.get(),
                doctor_id: appointment.doctor_id.get(),
                appointment_date: appointment.date,
                appointment_time: appointment.time,
                status: AppointmentStatus::Booked.as_str(),
            })
            .returning(appointments::id)
            .get_result(&mut conn)
            .await
            .map_err(map_write_error)?;
        load_written(&mut conn, id).await
    }

    async fn list(&self) -> Result<Vec<Appointment>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AppointmentJoinRow> = appointments::table
            .inner_join(patients::table)
            .inner_join(doctors::table)
            .order((
                appointments::appointment_date.asc(),
                appointments::appointment_time.asc(),
                appointments::id.asc(),
            ))
            .select((
                AppointmentRow::as_select(),
                PatientRow::as_select(),
                DoctorRow::as_select(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_write_error)?;
        rows.into_iter().map(appointment_from_join).collect()
    }

    async fn find_by_id(&self, id: AppointmentId) -> Result<Option<Appointment>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_one(&mut conn, id.get()).await
    }

    async fn update_schedule(
        &self,
        id: AppointmentId,
        expected: AppointmentStatus,
        schedule: &AppointmentSchedule,
    ) -> Result<Option<Appointment>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated: Option<i32> = diesel::update(
            appointments::table
                .filter(appointments::id.eq(id.get()))
                .filter(appointments::status.eq(expected.as_str())),
        )
        .set(&AppointmentScheduleUpdate {
            appointment_date: schedule.date,
            appointment_time: schedule.time,
            status: schedule.status.as_str(),
        })
        .returning(appointments::id)
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_write_error)?;

        match updated {
            Some(id) => load_written(&mut conn, id).await.map(Some),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: AppointmentId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(appointments::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_delete_error)?;
        Ok(deleted > 0)
    }
}
