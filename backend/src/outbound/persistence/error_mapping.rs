//! Shared Diesel error mapping for the clinic repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

/// How a foreign key violation should be read for the failing statement.
///
/// Inserts and updates violate a key when the row they point at is missing;
/// deletes violate one when other rows still point at the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ForeignKeyRole {
    Referencing,
    Referenced,
}

pub(crate) fn map_pool_error(error: PoolError) -> RepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RepositoryError::connection(message)
        }
    }
}

/// Map a Diesel failure onto [`RepositoryError`].
///
/// Database messages are logged at debug level and never forwarded; the
/// domain error carries only the constraint name where one is available.
pub(crate) fn map_diesel_error(error: DieselError, role: ForeignKeyRole) -> RepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            RepositoryError::duplicate(info.constraint_name().unwrap_or("unique constraint"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            let constraint = info.constraint_name().unwrap_or("foreign key").to_owned();
            match role {
                ForeignKeyRole::Referencing => RepositoryError::missing_reference(constraint),
                ForeignKeyRole::Referenced => RepositoryError::still_referenced(constraint),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RepositoryError::connection("database connection error")
        }
        DieselError::NotFound => RepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => RepositoryError::query("database query error"),
        _ => RepositoryError::query("database error"),
    }
}

/// Mapping for statements that never delete referenced rows.
pub(crate) fn map_write_error(error: DieselError) -> RepositoryError {
    map_diesel_error(error, ForeignKeyRole::Referencing)
}

/// Mapping for deletes guarded by `ON DELETE RESTRICT`.
pub(crate) fn map_delete_error(error: DieselError) -> RepositoryError {
    map_diesel_error(error, ForeignKeyRole::Referenced)
}
