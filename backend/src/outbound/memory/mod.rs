//! In-process store implementing every clinic repository port.
//!
//! Used when no database URL is configured, and by the HTTP integration
//! tests. All tables sit behind one mutex so each port call is atomic,
//! including queue number allocation, and the foreign key rules of the SQL
//! schema (`ON DELETE RESTRICT`, unique email, unique queue number) are
//! enforced the same way.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::error;

use crate::domain::ports::{
    AppointmentRepository, DoctorRepository, PatientRepository, QueueRepository, RepositoryError,
    UserRepository,
};
use crate::domain::{
    Appointment, AppointmentId, AppointmentSchedule, AppointmentStatus, Doctor, DoctorId,
    DoctorProfile, EmailAddress, NewAppointment, NewPatient, NewQueueEntry, NewUser, Patient,
    PatientId, PatientProfile, QueueEntry, QueueEntryId, QueueStatus, User, UserChanges,
    UserCredentialsRecord, UserId,
};

#[derive(Debug, Clone)]
struct UserRecord {
    name: String,
    email: EmailAddress,
    password_hash: String,
}

#[derive(Debug, Clone, Copy)]
struct AppointmentRecord {
    patient_id: PatientId,
    doctor_id: DoctorId,
    date: NaiveDate,
    time: NaiveTime,
    status: AppointmentStatus,
}

#[derive(Debug, Clone, Copy)]
struct QueueRecord {
    patient_id: PatientId,
    queue_number: i32,
    status: QueueStatus,
    created_at: DateTime<Utc>,
}

/// Monotonic id sequence mirroring a `SERIAL` column.
#[derive(Debug, Default)]
struct Sequence(i32);

impl Sequence {
    fn next(&mut self) -> i32 {
        self.0 += 1;
        self.0
    }
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, UserRecord>,
    patients: BTreeMap<PatientId, Patient>,
    doctors: BTreeMap<DoctorId, Doctor>,
    appointments: BTreeMap<AppointmentId, AppointmentRecord>,
    queue: BTreeMap<QueueEntryId, QueueRecord>,
    user_ids: Sequence,
    patient_ids: Sequence,
    doctor_ids: Sequence,
    appointment_ids: Sequence,
    queue_entry_ids: Sequence,
}

impl Tables {
    fn patient(&self, id: PatientId) -> Result<Patient, RepositoryError> {
        self.patients
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::missing_reference(format!("patient {id}")))
    }

    fn doctor(&self, id: DoctorId) -> Result<Doctor, RepositoryError> {
        self.doctors
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::missing_reference(format!("doctor {id}")))
    }

    fn appointment(
        &self,
        id: AppointmentId,
        record: &AppointmentRecord,
    ) -> Result<Appointment, RepositoryError> {
        Ok(Appointment {
            id,
            patient: self.patient(record.patient_id)?,
            doctor: self.doctor(record.doctor_id)?,
            date: record.date,
            time: record.time,
            status: record.status,
        })
    }

    fn queue_entry(
        &self,
        id: QueueEntryId,
        record: &QueueRecord,
    ) -> Result<QueueEntry, RepositoryError> {
        Ok(QueueEntry {
            id,
            patient: self.patient(record.patient_id)?,
            queue_number: record.queue_number,
            status: record.status,
            created_at: record.created_at,
        })
    }

    fn email_taken(&self, email: &EmailAddress, except: Option<UserId>) -> bool {
        self.users
            .iter()
            .any(|(id, user)| Some(*id) != except && user.email == *email)
    }
}

fn user_from(id: UserId, record: &UserRecord) -> User {
    User {
        id,
        name: record.name.clone(),
        email: record.email.clone(),
    }
}

fn patient_from(id: PatientId, profile: &PatientProfile, created_at: DateTime<Utc>) -> Patient {
    Patient {
        id,
        name: profile.name().to_owned(),
        phone: profile.phone().map(str::to_owned),
        created_at,
    }
}

fn doctor_from(id: DoctorId, profile: &DoctorProfile) -> Doctor {
    Doctor {
        id,
        name: profile.name().to_owned(),
        specialization: profile.specialization().to_owned(),
        gender: profile.gender().to_owned(),
        location: profile.location().to_owned(),
        available_from: profile.available_from(),
        available_to: profile.available_to(),
    }
}

/// Shared in-memory store; clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    /// Empty store; identifiers start at 1.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        self.tables.lock().map_err(|_| {
            error!("memory store lock poisoned");
            RepositoryError::query("memory store lock poisoned")
        })
    }
}

#[async_trait]
impl PatientRepository for MemoryStore {
    async fn create(&self, patient: &NewPatient) -> Result<Patient, RepositoryError> {
        let mut tables = self.lock()?;
        let id = PatientId::new(tables.patient_ids.next());
        let stored = patient_from(id, &patient.profile, patient.created_at);
        tables.patients.insert(id, stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Patient>, RepositoryError> {
        Ok(self.lock()?.patients.values().cloned().collect())
    }

    async fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>, RepositoryError> {
        Ok(self.lock()?.patients.get(&id).cloned())
    }

    async fn update(
        &self,
        id: PatientId,
        profile: &PatientProfile,
    ) -> Result<Option<Patient>, RepositoryError> {
        let mut tables = self.lock()?;
        let Some(patient) = tables.patients.get_mut(&id) else {
            return Ok(None);
        };
        *patient = patient_from(id, profile, patient.created_at);
        Ok(Some(patient.clone()))
    }

    async fn delete(&self, id: PatientId) -> Result<bool, RepositoryError> {
        let mut tables = self.lock()?;
        let referenced = tables.appointments.values().any(|a| a.patient_id == id)
            || tables.queue.values().any(|q| q.patient_id == id);
        if referenced && tables.patients.contains_key(&id) {
            return Err(RepositoryError::still_referenced(format!("patient {id}")));
        }
        Ok(tables.patients.remove(&id).is_some())
    }

    async fn count_created_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<u64, RepositoryError> {
        let tables = self.lock()?;
        let count = tables
            .patients
            .values()
            .filter(|p| p.created_at >= from && p.created_at < to)
            .count();
        u64::try_from(count).map_err(|_| RepositoryError::query("patient count overflow"))
    }
}

#[async_trait]
impl DoctorRepository for MemoryStore {
    async fn create(&self, profile: &DoctorProfile) -> Result<Doctor, RepositoryError> {
        let mut tables = self.lock()?;
        let id = DoctorId::new(tables.doctor_ids.next());
        let doctor = doctor_from(id, profile);
        tables.doctors.insert(id, doctor.clone());
        Ok(doctor)
    }

    async fn list(&self) -> Result<Vec<Doctor>, RepositoryError> {
        Ok(self.lock()?.doctors.values().cloned().collect())
    }

    async fn find_by_id(&self, id: DoctorId) -> Result<Option<Doctor>, RepositoryError> {
        Ok(self.lock()?.doctors.get(&id).cloned())
    }

    async fn update(
        &self,
        id: DoctorId,
        profile: &DoctorProfile,
    ) -> Result<Option<Doctor>, RepositoryError> {
        let mut tables = self.lock()?;
        let Some(doctor) = tables.doctors.get_mut(&id) else {
            return Ok(None);
        };
        *doctor = doctor_from(id, profile);
        Ok(Some(doctor.clone()))
    }

    async fn delete(&self, id: DoctorId) -> Result<bool, RepositoryError> {
        let mut tables = self.lock()?;
        let referenced = tables.appointments.values().any(|a| a.doctor_id == id);
        if referenced && tables.doctors.contains_key(&id) {
            return Err(RepositoryError::still_referenced(format!("doctor {id}")));
        }
        Ok(tables.doctors.remove(&id).is_some())
    }
}

#[async_trait]
impl AppointmentRepository for MemoryStore {
    async fn create(&self, appointment: &NewAppointment) -> Result<Appointment, RepositoryError> {
        let mut tables = self.lock()?;
        let record = AppointmentRecord {
            patient_id: appointment.patient_id,
            doctor_id: appointment.doctor_id,
            date: appointment.date,
            time: appointment.time,
            status: AppointmentStatus::Booked,
        };
        // Resolve references before taking an id, as a failed INSERT would.
        let created = tables.appointment(AppointmentId::new(0), &record)?;
        let id = AppointmentId::new(tables.appointment_ids.next());
        tables.appointments.insert(id, record);
        Ok(Appointment { id, ..created })
    }

    async fn list(&self) -> Result<Vec<Appointment>, RepositoryError> {
        let tables = self.lock()?;
        let mut appointments = tables
            .appointments
            .iter()
            .map(|(id, record)| tables.appointment(*id, record))
            .collect::<Result<Vec<_>, _>>()?;
        appointments.sort_by_key(|a| (a.date, a.time, a.id));
        Ok(appointments)
    }

    async fn find_by_id(&self, id: AppointmentId) -> Result<Option<Appointment>, RepositoryError> {
        let tables = self.lock()?;
        tables
            .appointments
            .get(&id)
            .map(|record| tables.appointment(id, record))
            .transpose()
    }

    async fn update_schedule(
        &self,
        id: AppointmentId,
        expected: AppointmentStatus,
        schedule: &AppointmentSchedule,
    ) -> Result<Option<Appointment>, RepositoryError> {
        let mut tables = self.lock()?;
        let Some(record) = tables.appointments.get_mut(&id) else {
            return Ok(None);
        };
        if record.status != expected {
            return Ok(None);
        }
        record.date = schedule.date;
        record.time = schedule.time;
        record.status = schedule.status;
        let record = *record;
        tables.appointment(id, &record).map(Some)
    }

    async fn delete(&self, id: AppointmentId) -> Result<bool, RepositoryError> {
        Ok(self.lock()?.appointments.remove(&id).is_some())
    }
}

#[async_trait]
impl QueueRepository for MemoryStore {
    async fn enqueue(&self, entry: &NewQueueEntry) -> Result<QueueEntry, RepositoryError> {
        let mut tables = self.lock()?;
        let queue_number = tables
            .queue
            .values()
            .map(|q| q.queue_number)
            .max()
            .unwrap_or(0)
            + 1;
        let record = QueueRecord {
            patient_id: entry.patient_id,
            queue_number,
            status: entry.status,
            created_at: entry.created_at,
        };
        let created = tables.queue_entry(QueueEntryId::new(0), &record)?;
        let id = QueueEntryId::new(tables.queue_entry_ids.next());
        tables.queue.insert(id, record);
        Ok(QueueEntry { id, ..created })
    }

    async fn list(&self, status: Option<QueueStatus>) -> Result<Vec<QueueEntry>, RepositoryError> {
        let tables = self.lock()?;
        let mut entries = tables
            .queue
            .iter()
            .filter(|(_, record)| status.is_none_or(|wanted| record.status == wanted))
            .map(|(id, record)| tables.queue_entry(*id, record))
            .collect::<Result<Vec<_>, _>>()?;
        entries.sort_by_key(|e| e.queue_number);
        Ok(entries)
    }

    async fn find_by_id(&self, id: QueueEntryId) -> Result<Option<QueueEntry>, RepositoryError> {
        let tables = self.lock()?;
        tables
            .queue
            .get(&id)
            .map(|record| tables.queue_entry(id, record))
            .transpose()
    }

    async fn update_status(
        &self,
        id: QueueEntryId,
        expected: QueueStatus,
        next: QueueStatus,
    ) -> Result<Option<QueueEntry>, RepositoryError> {
        let mut tables = self.lock()?;
        let Some(record) = tables.queue.get_mut(&id) else {
            return Ok(None);
        };
        if record.status != expected {
            return Ok(None);
        }
        record.status = next;
        let record = *record;
        tables.queue_entry(id, &record).map(Some)
    }

    async fn delete(&self, id: QueueEntryId) -> Result<bool, RepositoryError> {
        Ok(self.lock()?.queue.remove(&id).is_some())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let mut tables = self.lock()?;
        if tables.email_taken(&user.email, None) {
            return Err(RepositoryError::duplicate("users_email_key"));
        }
        let id = UserId::new(tables.user_ids.next());
        let record = UserRecord {
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
        };
        let created = user_from(id, &record);
        tables.users.insert(id, record);
        Ok(created)
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self
            .lock()?
            .users
            .iter()
            .map(|(id, record)| user_from(*id, record))
            .collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .lock()?
            .users
            .get(&id)
            .map(|record| user_from(id, record)))
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentialsRecord>, RepositoryError> {
        Ok(self
            .lock()?
            .users
            .iter()
            .find(|(_, record)| record.email.as_str() == email)
            .map(|(id, record)| UserCredentialsRecord {
                user: user_from(*id, record),
                password_hash: record.password_hash.clone(),
            }))
    }

    async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, RepositoryError> {
        let mut tables = self.lock()?;
        if !tables.users.contains_key(&id) {
            return Ok(None);
        }
        let email_conflict = changes
            .email
            .as_ref()
            .is_some_and(|email| tables.email_taken(email, Some(id)));
        if email_conflict {
            return Err(RepositoryError::duplicate("users_email_key"));
        }
        let Some(record) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            record.name.clone_from(name);
        }
        if let Some(email) = &changes.email {
            record.email = email.clone();
        }
        if let Some(hash) = &changes.password_hash {
            record.password_hash.clone_from(hash);
        }
        Ok(Some(user_from(id, record)))
    }

    async fn delete(&self, id: UserId) -> Result<bool, RepositoryError> {
        Ok(self.lock()?.users.remove(&id).is_some())
    }
}
