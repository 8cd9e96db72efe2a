//! Internal Diesel row structs and their conversion into domain entities.
//!
//! These types are implementation details of the persistence layer and never
//! leave it.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;
use tracing::warn;

use crate::domain::ports::RepositoryError;
use crate::domain::{
    Appointment, AppointmentId, AppointmentStatus, Doctor, DoctorId, EmailAddress, Patient,
    PatientId, QueueEntry, QueueEntryId, QueueStatus, User, UserCredentialsRecord, UserId,
};

use super::schema::{appointments, doctors, patients, queue_entries, users};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Partial update; `None` columns are left untouched by Diesel.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub password_hash: Option<&'a str>,
}

impl UserRow {
    fn email(&self) -> Result<EmailAddress, RepositoryError> {
        EmailAddress::new(&self.email).map_err(|err| {
            warn!(user_id = self.id, error = %err, "stored email failed validation");
            RepositoryError::query("stored user email is invalid")
        })
    }

    /// Convert to the domain user, re-validating the stored email.
    pub fn into_user(self) -> Result<User, RepositoryError> {
        Ok(User {
            email: self.email()?,
            id: UserId::new(self.id),
            name: self.name,
        })
    }

    /// Convert to a user plus its stored password hash.
    pub fn into_credentials(self) -> Result<UserCredentialsRecord, RepositoryError> {
        let password_hash = self.password_hash.clone();
        Ok(UserCredentialsRecord {
            user: self.into_user()?,
            password_hash,
        })
    }
}

// ---------------------------------------------------------------------------
// Patients
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = patients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PatientRow {
    pub id: i32,
    pub name: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = patients)]
pub(crate) struct NewPatientRow<'a> {
    pub name: &'a str,
    pub phone: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

/// Full profile overwrite; `phone` is written even when `None`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = patients)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PatientUpdate<'a> {
    pub name: &'a str,
    pub phone: Option<&'a str>,
}

impl From<PatientRow> for Patient {
    fn from(row: PatientRow) -> Self {
        Self {
            id: PatientId::new(row.id),
            name: row.name,
            phone: row.phone,
            created_at: row.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Doctors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = doctors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DoctorRow {
    pub id: i32,
    pub name: String,
    pub specialization: String,
    pub gender: String,
    pub location: String,
    pub available_from: NaiveTime,
    pub available_to: NaiveTime,
}

/// Used for both insert and full update.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = doctors)]
pub(crate) struct DoctorValues<'a> {
    pub name: &'a str,
    pub specialization: &'a str,
    pub gender: &'a str,
    pub location: &'a str,
    pub available_from: NaiveTime,
    pub available_to: NaiveTime,
}

impl From<DoctorRow> for Doctor {
    fn from(row: DoctorRow) -> Self {
        Self {
            id: DoctorId::new(row.id),
            name: row.name,
            specialization: row.specialization,
            gender: row.gender,
            location: row.location,
            available_from: row.available_from,
            available_to: row.available_to,
        }
    }
}

// ---------------------------------------------------------------------------
// Appointments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = appointments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AppointmentRow {
    pub id: i32,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub status: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = appointments)]
pub(crate) struct NewAppointmentRow<'a> {
    pub patient_id: i32,
    pub doctor_id: i32,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub status: &'a str,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = appointments)]
pub(crate) struct AppointmentScheduleUpdate<'a> {
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub status: &'a str,
}

/// An appointment row joined with its patient and doctor.
pub(crate) type AppointmentJoinRow = (AppointmentRow, PatientRow, DoctorRow);

pub(crate) fn appointment_from_join(
    (row, patient, doctor): AppointmentJoinRow,
) -> Result<Appointment, RepositoryError> {
    let status = row.status.parse::<AppointmentStatus>().map_err(|err| {
        warn!(appointment_id = row.id, error = %err, "stored appointment status is unknown");
        RepositoryError::query("stored appointment status is invalid")
    })?;
    Ok(Appointment {
        id: AppointmentId::new(row.id),
        patient: patient.into(),
        doctor: doctor.into(),
        date: row.appointment_date,
        time: row.appointment_time,
        status,
    })
}

// ---------------------------------------------------------------------------
// Queue entries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = queue_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct QueueEntryRow {
    pub id: i32,
    pub queue_number: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = queue_entries)]
pub(crate) struct NewQueueEntryRow<'a> {
    pub patient_id: i32,
    pub queue_number: i32,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
}

pub(crate) type QueueJoinRow = (QueueEntryRow, PatientRow);

pub(crate) fn queue_entry_from_join(
    (row, patient): QueueJoinRow,
) -> Result<QueueEntry, RepositoryError> {
    let status = row.status.parse::<QueueStatus>().map_err(|err| {
        warn!(queue_entry_id = row.id, error = %err, "stored queue status is unknown");
        RepositoryError::query("stored queue status is invalid")
    })?;
    Ok(QueueEntry {
        id: QueueEntryId::new(row.id),
        patient: patient.into(),
        queue_number: row.queue_number,
        status,
        created_at: row.created_at,
    })
}
