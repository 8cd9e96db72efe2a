//! Port for user account persistence.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserChanges, UserCredentialsRecord, UserId};

use super::RepositoryError;

/// Port for storing user accounts and looking up credentials.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user.
    ///
    /// Email uniqueness is enforced by the store and surfaces as
    /// [`RepositoryError::Duplicate`].
    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError>;

    /// All users ordered by id.
    async fn list(&self) -> Result<Vec<User>, RepositoryError>;

    /// Find a user by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// Find a user and their password hash by normalised email.
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentialsRecord>, RepositoryError>;

    /// Apply the supplied changes; `None` when the user is absent.
    async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, RepositoryError>;

    /// Delete a user. Returns `false` when no row matched.
    async fn delete(&self, id: UserId) -> Result<bool, RepositoryError>;
}
