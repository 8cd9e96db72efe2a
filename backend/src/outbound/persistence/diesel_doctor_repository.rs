//! PostgreSQL-backed `DoctorRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DoctorRepository, RepositoryError};
use crate::domain::{Doctor, DoctorId, DoctorProfile};

use super::error_mapping::{map_delete_error, map_pool_error, map_write_error};
use super::models::{DoctorRow, DoctorValues};
use super::pool::DbPool;
use super::schema::doctors;

/// Diesel-backed implementation of the [`DoctorRepository`] port.
#[derive(Clone)]
pub struct DieselDoctorRepository {
    pool: DbPool,
}

impl DieselDoctorRepository {
    /// Create a repository backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn values(profile: &DoctorProfile) -> DoctorValues<'_> {
    DoctorValues {
        name: profile.name(),
        specialization: profile.specialization(),
        gender: profile.gender(),
        location: profile.location(),
        available_from: profile.available_from(),
        available_to: profile.available_to(),
    }
}

#[async_trait]
impl DoctorRepository for DieselDoctorRepository {
    async fn create(&self, profile: &DoctorProfile) -> Result<Doctor, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(doctors::table)
            .values(&values(profile))
            .returning(DoctorRow::as_returning())
            .get_result::<DoctorRow>(&mut conn)
            .await
            .map(Doctor::from)
            .map_err(map_write_error)
    }

    async fn list(&self) -> Result<Vec<Doctor>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<DoctorRow> = doctors::table
            .order(doctors::id.asc())
            .select(DoctorRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_write_error)?;
        Ok(rows.into_iter().map(Doctor::from).collect())
    }

    async fn find_by_id(&self, id: DoctorId) -> Result<Option<Doctor>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        doctors::table
            .find(id.get())
            .select(DoctorRow::as_select())
            .first::<DoctorRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Doctor::from))
            .map_err(map_write_error)
    }

    async fn update(
        &self,
        id: DoctorId,
        profile: &DoctorProfile,
    ) -> Result<Option<Doctor>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(doctors::table.find(id.get()))
            .set(&values(profile))
            .returning(DoctorRow::as_returning())
            .get_result::<DoctorRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Doctor::from))
            .map_err(map_write_error)
    }

    async fn delete(&self, id: DoctorId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(doctors::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_delete_error)?;
        Ok(deleted > 0)
    }
}
