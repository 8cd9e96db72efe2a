//! Appointments and their booking lifecycle.
//!
//! An appointment starts `booked` and may move to `completed` or `canceled`.
//! Both are terminal: once reached, neither the status nor the slot changes.
//! Re-asserting the current status is accepted as a no-op.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};

use super::{AppointmentId, Doctor, DoctorId, Patient, PatientId};

/// Booking status of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppointmentStatus {
    Booked,
    Completed,
    Canceled,
}

impl AppointmentStatus {
    /// Wire and storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Booked => "booked",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }

    /// Terminal statuses admit no further changes.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Canceled)
    }

    /// Whether moving from `self` to `next` is allowed.
    ///
    /// # Examples
    /// ```
    /// use frontdesk::domain::AppointmentStatus;
    ///
    /// assert!(AppointmentStatus::Booked.can_transition_to(AppointmentStatus::Canceled));
    /// assert!(!AppointmentStatus::Canceled.can_transition_to(AppointmentStatus::Booked));
    /// ```
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Booked, _) | (Self::Completed, Self::Completed) | (Self::Canceled, Self::Canceled)
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when parsing an unknown appointment status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown appointment status: {0}")]
pub struct UnknownAppointmentStatus(pub String);

impl FromStr for AppointmentStatus {
    type Err = UnknownAppointmentStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "booked" => Ok(Self::Booked),
            "completed" => Ok(Self::Completed),
            "canceled" => Ok(Self::Canceled),
            other => Err(UnknownAppointmentStatus(other.to_owned())),
        }
    }
}

/// A persisted appointment with its patient and doctor loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub id: AppointmentId,
    pub patient: Patient,
    pub doctor: Doctor,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: AppointmentStatus,
}

/// Insert payload for a new booking. The status is always `booked`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub patient_id: PatientId,
    pub doctor_id: DoctorId,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// The mutable slot and status of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppointmentSchedule {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: AppointmentStatus,
}

/// Partial appointment update as supplied by a caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppointmentChanges {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub status: Option<AppointmentStatus>,
}

/// Rejected appointment mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AppointmentTransitionError {
    #[error("appointment cannot move from {from} to {to}")]
    StatusChange {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
    #[error("a {status} appointment cannot be rescheduled")]
    Reschedule { status: AppointmentStatus },
}

impl Appointment {
    /// Current slot and status.
    pub fn schedule(&self) -> AppointmentSchedule {
        AppointmentSchedule {
            date: self.date,
            time: self.time,
            status: self.status,
        }
    }

    /// Apply `changes`, enforcing the booking lifecycle.
    ///
    /// Slot changes are only accepted while the appointment is `booked`, and
    /// may be combined with a move out of `booked`.
    pub fn apply(
        &self,
        changes: AppointmentChanges,
    ) -> Result<AppointmentSchedule, AppointmentTransitionError> {
        let next_status = changes.status.unwrap_or(self.status);
        if !self.status.can_transition_to(next_status) {
            return Err(AppointmentTransitionError::StatusChange {
                from: self.status,
                to: next_status,
            });
        }

        let date = changes.date.unwrap_or(self.date);
        let time = changes.time.unwrap_or(self.time);
        let moved = date != self.date || time != self.time;
        if moved && self.status.is_terminal() {
            return Err(AppointmentTransitionError::Reschedule {
                status: self.status,
            });
        }

        Ok(AppointmentSchedule {
            date,
            time,
            status: next_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    use AppointmentStatus::{Booked, Canceled, Completed};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).expect("valid date")
    }

    fn time(hour: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, 0, 0).expect("valid time")
    }

    #[fixture]
    fn appointment() -> Appointment {
        Appointment {
            id: AppointmentId::new(1),
            patient: Patient {
                id: PatientId::new(1),
                name: "Alice".to_owned(),
                phone: None,
                created_at: Utc.with_ymd_and_hms(2024, 4, 1, 8, 0, 0).single().expect("valid"),
            },
            doctor: Doctor {
                id: DoctorId::new(1),
                name: "Dr. X".to_owned(),
                specialization: "GP".to_owned(),
                gender: "female".to_owned(),
                location: "Room 1".to_owned(),
                available_from: time(9),
                available_to: time(17),
            },
            date: date(1),
            time: time(10),
            status: Booked,
        }
    }

    #[rstest]
    #[case(Booked, Booked, true)]
    #[case(Booked, Completed, true)]
    #[case(Booked, Canceled, true)]
    #[case(Completed, Completed, true)]
    #[case(Completed, Booked, false)]
    #[case(Completed, Canceled, false)]
    #[case(Canceled, Canceled, true)]
    #[case(Canceled, Booked, false)]
    #[case(Canceled, Completed, false)]
    fn transition_table(
        #[case] from: AppointmentStatus,
        #[case] to: AppointmentStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(from.can_transition_to(to), allowed);
    }

    #[rstest]
    #[case("booked", Booked)]
    #[case("completed", Completed)]
    #[case("canceled", Canceled)]
    fn parses_wire_values(#[case] raw: &str, #[case] expected: AppointmentStatus) {
        assert_eq!(raw.parse::<AppointmentStatus>(), Ok(expected));
        assert_eq!(expected.as_str(), raw);
    }

    #[rstest]
    fn rejects_unknown_status() {
        assert!("cancelled".parse::<AppointmentStatus>().is_err());
    }

    #[rstest]
    fn booked_can_be_completed_and_moved_together(appointment: Appointment) {
        let schedule = appointment
            .apply(AppointmentChanges {
                date: Some(date(2)),
                time: None,
                status: Some(Completed),
            })
            .expect("allowed");
        assert_eq!(schedule.date, date(2));
        assert_eq!(schedule.time, time(10));
        assert_eq!(schedule.status, Completed);
    }

    #[rstest]
    fn terminal_appointment_cannot_reopen(mut appointment: Appointment) {
        appointment.status = Canceled;
        let err = appointment
            .apply(AppointmentChanges {
                status: Some(Booked),
                ..AppointmentChanges::default()
            })
            .expect_err("terminal");
        assert_eq!(
            err,
            AppointmentTransitionError::StatusChange {
                from: Canceled,
                to: Booked
            }
        );
    }

    #[rstest]
    fn terminal_appointment_cannot_be_rescheduled(mut appointment: Appointment) {
        appointment.status = Completed;
        let err = appointment
            .apply(AppointmentChanges {
                time: Some(time(11)),
                ..AppointmentChanges::default()
            })
            .expect_err("terminal");
        assert_eq!(err, AppointmentTransitionError::Reschedule { status: Completed });
    }

    #[rstest]
    fn restating_terminal_values_is_a_no_op(mut appointment: Appointment) {
        appointment.status = Completed;
        let schedule = appointment
            .apply(AppointmentChanges {
                date: Some(appointment.date),
                time: Some(appointment.time),
                status: Some(Completed),
            })
            .expect("no-op accepted");
        assert_eq!(schedule, appointment.schedule());
    }
}
