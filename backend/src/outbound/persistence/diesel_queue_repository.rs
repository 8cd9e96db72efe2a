//! PostgreSQL-backed `QueueRepository` implementation using Diesel ORM.
//!
//! Queue numbers are allocated inside a transaction that first takes a
//! transaction-scoped advisory lock, so concurrent enqueues serialise on the
//! `MAX(queue_number) + 1` read. The unique index on `queue_number` backs this
//! up at the storage level.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{QueueRepository, RepositoryError};
use crate::domain::{NewQueueEntry, QueueEntry, QueueEntryId, QueueStatus};

use super::error_mapping::{map_delete_error, map_pool_error, map_write_error};
use super::models::{
    NewQueueEntryRow, PatientRow, QueueEntryRow, QueueJoinRow, queue_entry_from_join,
};
use super::pool::DbPool;
use super::schema::{patients, queue_entries};

/// Advisory lock key guarding queue number allocation.
const QUEUE_NUMBER_LOCK_KEY: i64 = 0x5155_4555_4e55_4d00;

/// Diesel-backed implementation of the [`QueueRepository`] port.
#[derive(Clone)]
pub struct DieselQueueRepository {
    pool: DbPool,
}

impl DieselQueueRepository {
    /// Create a repository backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

async fn load_one(
    conn: &mut AsyncPgConnection,
    id: i32,
) -> Result<Option<QueueEntry>, RepositoryError> {
    let row: Option<QueueJoinRow> = queue_entries::table
        .inner_join(patients::table)
        .filter(queue_entries::id.eq(id))
        .select((QueueEntryRow::as_select(), PatientRow::as_select()))
        .first(conn)
        .await
        .optional()
        .map_err(map_write_error)?;
    row.map(queue_entry_from_join).transpose()
}

async fn load_written(conn: &mut AsyncPgConnection, id: i32) -> Result<QueueEntry, RepositoryError> {
    load_one(conn, id)
        .await?
        .ok_or_else(|| RepositoryError::query("queue entry vanished after write"))
}

#[async_trait]
impl QueueRepository for DieselQueueRepository {
    async fn enqueue(&self, entry: &NewQueueEntry) -> Result<QueueEntry, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let patient_id = entry.patient_id.get();
        let status = entry.status.as_str();
        let created_at = entry.created_at;

        let id = conn
            .transaction::<i32, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::sql_query("SELECT pg_advisory_xact_lock($1)")
                        .bind::<BigInt, _>(QUEUE_NUMBER_LOCK_KEY)
                        .execute(conn)
                        .await?;

                    let highest: Option<i32> = queue_entries::table
                        .select(diesel::dsl::max(queue_entries::queue_number))
                        .first(conn)
                        .await?;

                    diesel::insert_into(queue_entries::table)
                        .values(&NewQueueEntryRow {
                            patient_id,
                            queue_number: highest.unwrap_or(0) + 1,
                            status,
                            created_at,
                        })
                        .returning(queue_entries::id)
                        .get_result(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_write_error)?;

        load_written(&mut conn, id).await
    }

    async fn list(&self, status: Option<QueueStatus>) -> Result<Vec<QueueEntry>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = queue_entries::table
            .inner_join(patients::table)
            .select((QueueEntryRow::as_select(), PatientRow::as_select()))
            .order(queue_entries::queue_number.asc())
            .into_boxed();
        if let Some(status) = status {
            query = query.filter(queue_entries::status.eq(status.as_str()));
        }

        let rows: Vec<QueueJoinRow> = query.load(&mut conn).await.map_err(map_write_error)?;
        rows.into_iter().map(queue_entry_from_join).collect()
    }

    async fn find_by_id(&self, id: QueueEntryId) -> Result<Option<QueueEntry>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_one(&mut conn, id.get()).await
    }

    async fn update_status(
        &self,
        id: QueueEntryId,
        expected: QueueStatus,
        next: QueueStatus,
    ) -> Result<Option<QueueEntry>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated: Option<i32> = diesel::update(
            queue_entries::table
                .filter(queue_entries::id.eq(id.get()))
                .filter(queue_entries::status.eq(expected.as_str())),
        )
        .set(queue_entries::status.eq(next.as_str()))
        .returning(queue_entries::id)
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_write_error)?;

        match updated {
            Some(id) => load_written(&mut conn, id).await.map(Some),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: QueueEntryId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(queue_entries::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_delete_error)?;
        Ok(deleted > 0)
    }
}
