//! Response bodies shared across handlers.
//!
//! Appointments, queue entries and the dashboard embed patients and doctors,
//! so their wire shapes live here rather than in a single handler module.
//! Entity attributes use snake_case field names.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Appointment, Doctor, Patient, QueueEntry, User};
use crate::inbound::http::validation::format_time;

/// Patient as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PatientBody {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "+44 20 7946 0000")]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Patient> for PatientBody {
    fn from(value: Patient) -> Self {
        Self {
            id: value.id.get(),
            name: value.name,
            phone: value.phone,
            created_at: value.created_at,
        }
    }
}

/// Doctor as returned by the API; availability times are `HH:MM`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DoctorBody {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Dr. X")]
    pub name: String,
    #[schema(example = "Cardiology")]
    pub specialization: String,
    #[schema(example = "female")]
    pub gender: String,
    #[schema(example = "Room 4")]
    pub location: String,
    #[schema(example = "09:00")]
    pub available_from: String,
    #[schema(example = "17:00")]
    pub available_to: String,
}

impl From<Doctor> for DoctorBody {
    fn from(value: Doctor) -> Self {
        Self {
            id: value.id.get(),
            name: value.name,
            specialization: value.specialization,
            gender: value.gender,
            location: value.location,
            available_from: format_time(value.available_from),
            available_to: format_time(value.available_to),
        }
    }
}

/// Appointment with its patient and doctor embedded.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AppointmentBody {
    #[schema(example = 1)]
    pub id: i32,
    pub patient: PatientBody,
    pub doctor: DoctorBody,
    #[schema(value_type = String, format = Date, example = "2024-05-01")]
    pub date: NaiveDate,
    #[schema(example = "10:00")]
    pub time: String,
    #[schema(example = "booked")]
    pub status: String,
}

impl From<Appointment> for AppointmentBody {
    fn from(value: Appointment) -> Self {
        Self {
            id: value.id.get(),
            patient: value.patient.into(),
            doctor: value.doctor.into(),
            date: value.date,
            time: format_time(value.time),
            status: value.status.as_str().to_owned(),
        }
    }
}

/// Walk-in queue entry with its patient embedded.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct QueueEntryBody {
    #[schema(example = 1)]
    pub id: i32,
    pub patient: PatientBody,
    #[schema(example = 1)]
    pub queue_number: i32,
    #[schema(example = "waiting")]
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<QueueEntry> for QueueEntryBody {
    fn from(value: QueueEntry) -> Self {
        Self {
            id: value.id.get(),
            patient: value.patient.into(),
            queue_number: value.queue_number,
            status: value.status.as_str().to_owned(),
            created_at: value.created_at,
        }
    }
}

/// User account; the password hash is never part of the payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserBody {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Front Desk")]
    pub name: String,
    #[schema(example = "desk@clinic.test")]
    pub email: String,
}

impl From<User> for UserBody {
    fn from(value: User) -> Self {
        Self {
            id: value.id.get(),
            name: value.name,
            email: value.email.as_str().to_owned(),
        }
    }
}
