//! PostgreSQL-backed `PatientRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PatientRepository, RepositoryError};
use crate::domain::{NewPatient, Patient, PatientId, PatientProfile};

use super::error_mapping::{map_delete_error, map_pool_error, map_write_error};
use super::models::{NewPatientRow, PatientRow, PatientUpdate};
use super::pool::DbPool;
use super::schema::patients;

/// Diesel-backed implementation of the [`PatientRepository`] port.
#[derive(Clone)]
pub struct DieselPatientRepository {
    pool: DbPool,
}

impl DieselPatientRepository {
    /// Create a repository backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PatientRepository for DieselPatientRepository {
    async fn create(&self, patient: &NewPatient) -> Result<Patient, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewPatientRow {
            name: patient.profile.name(),
            phone: patient.profile.phone(),
            created_at: patient.created_at,
        };

        diesel::insert_into(patients::table)
            .values(&row)
            .returning(PatientRow::as_returning())
            .get_result::<PatientRow>(&mut conn)
            .await
            .map(Patient::from)
            .map_err(map_write_error)
    }

    async fn list(&self) -> Result<Vec<Patient>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PatientRow> = patients::table
            .order(patients::id.asc())
            .select(PatientRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_write_error)?;
        Ok(rows.into_iter().map(Patient::from).collect())
    }

    async fn find_by_id(&self, id: PatientId) -> Result<Option<Patient>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        patients::table
            .find(id.get())
            .select(PatientRow::as_select())
            .first::<PatientRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Patient::from))
            .map_err(map_write_error)
    }

    async fn update(
        &self,
        id: PatientId,
        profile: &PatientProfile,
    ) -> Result<Option<Patient>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(patients::table.find(id.get()))
            .set(&PatientUpdate {
                name: profile.name(),
                phone: profile.phone(),
            })
            .returning(PatientRow::as_returning())
            .get_result::<PatientRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Patient::from))
            .map_err(map_write_error)
    }

    async fn delete(&self, id: PatientId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(patients::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_delete_error)?;
        Ok(deleted > 0)
    }

    async fn count_created_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<u64, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count: i64 = patients::table
            .filter(patients::created_at.ge(from))
            .filter(patients::created_at.lt(to))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_write_error)?;
        u64::try_from(count).map_err(|_| RepositoryError::query("negative patient count"))
    }
}
