//! Helpers shared by the domain services.

use serde_json::json;
use tracing::{error, warn};

use crate::domain::Error;
use crate::domain::ports::RepositoryError;

/// Map repository failures onto domain errors.
///
/// Services match the variants they can describe better before falling back
/// to this mapping.
pub(crate) fn map_repository_error(error: RepositoryError) -> Error {
    match error {
        RepositoryError::Connection { message } => {
            warn!(%message, "repository unavailable");
            Error::service_unavailable("storage is temporarily unavailable")
        }
        RepositoryError::Query { message } => {
            error!(%message, "repository query failed");
            Error::internal(format!("repository error: {message}"))
        }
        RepositoryError::Duplicate { message } => Error::conflict(message),
        RepositoryError::StillReferenced { message } => Error::conflict(message),
        RepositoryError::MissingReference { message } => Error::not_found(message),
    }
}

/// Build an `invalid_request` error describing one rejected field.
pub(crate) fn invalid_field(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(RepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(RepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(RepositoryError::duplicate("email taken"), ErrorCode::Conflict)]
    #[case(RepositoryError::still_referenced("in use"), ErrorCode::Conflict)]
    #[case(RepositoryError::missing_reference("gone"), ErrorCode::NotFound)]
    fn maps_each_variant(#[case] error: RepositoryError, #[case] expected: ErrorCode) {
        assert_eq!(map_repository_error(error).code(), expected);
    }

    #[rstest]
    fn connection_details_are_not_exposed() {
        let mapped = map_repository_error(RepositoryError::connection("10.0.0.5 refused"));
        assert!(!mapped.message().contains("10.0.0.5"));
    }

    #[rstest]
    fn invalid_field_carries_details() {
        let err = invalid_field("name", "empty_name", "name must not be empty");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({ "field": "name", "code": "empty_name" }))
        );
    }
}
