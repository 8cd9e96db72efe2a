//! User account service implementing the [`UsersService`] driving port.
//!
//! Passwords are hashed through the [`CredentialHasher`] port before they
//! reach the repository; plain text never leaves this module.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{
    CredentialHashError, CredentialHasher, RegisterUserRequest, RepositoryError,
    UpdateUserRequest, UserRepository, UsersService,
};
use crate::domain::service_support::{invalid_field, map_repository_error};
use crate::domain::{
    EmailAddress, Error, NewUser, Password, User, UserChanges, UserId, UserValidationError,
    normalize_user_name,
};

const USER_NOT_FOUND: &str = "User not found";
const EMAIL_TAKEN: &str = "Email is already registered";

fn map_validation_error(error: UserValidationError) -> Error {
    let (field, code) = match error {
        UserValidationError::EmptyName => ("name", "empty_name"),
        UserValidationError::EmptyEmail => ("email", "empty_email"),
        UserValidationError::MalformedEmail => ("email", "malformed_email"),
        UserValidationError::EmptyPassword => ("password", "empty_password"),
    };
    invalid_field(field, code, error.to_string())
}

fn map_write_error(error: RepositoryError) -> Error {
    match error {
        RepositoryError::Duplicate { .. } => Error::conflict(EMAIL_TAKEN),
        other => map_repository_error(other),
    }
}

fn map_hash_error(err: CredentialHashError) -> Error {
    error!(error = %err, "password hashing failed");
    Error::internal("password hashing failed")
}

/// User service backed by a [`UserRepository`] and a [`CredentialHasher`].
#[derive(Clone)]
pub struct UsersServiceImpl<U> {
    users: Arc<U>,
    hasher: Arc<dyn CredentialHasher>,
}

impl<U> UsersServiceImpl<U> {
    /// Create the service; passwords are hashed with `hasher`.
    pub fn new(users: Arc<U>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { users, hasher }
    }

    fn hash(&self, password: &Password) -> Result<String, Error> {
        self.hasher.hash(password.expose()).map_err(map_hash_error)
    }
}

#[async_trait]
impl<U> UsersService for UsersServiceImpl<U>
where
    U: UserRepository,
{
    async fn register(&self, request: RegisterUserRequest) -> Result<User, Error> {
        let name = normalize_user_name(&request.name).map_err(map_validation_error)?;
        let email = EmailAddress::new(&request.email).map_err(map_validation_error)?;
        let password = Password::new(&request.password).map_err(map_validation_error)?;
        let password_hash = self.hash(&password)?;

        let user = self
            .users
            .create(&NewUser {
                name,
                email,
                password_hash,
            })
            .await
            .map_err(map_write_error)?;
        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, Error> {
        self.users.list().await.map_err(map_repository_error)
    }

    async fn get(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }

    async fn update(&self, id: UserId, request: UpdateUserRequest) -> Result<User, Error> {
        let name = request
            .name
            .as_deref()
            .map(normalize_user_name)
            .transpose()
            .map_err(map_validation_error)?;
        let email = request
            .email
            .as_deref()
            .map(EmailAddress::new)
            .transpose()
            .map_err(map_validation_error)?;
        let password = request
            .password
            .as_deref()
            .map(Password::new)
            .transpose()
            .map_err(map_validation_error)?;
        let password_hash = password.as_ref().map(|pw| self.hash(pw)).transpose()?;

        let changes = UserChanges {
            name,
            email,
            password_hash,
        };
        if changes.is_empty() {
            return self.get(id).await;
        }

        let user = self
            .users
            .update(id, &changes)
            .await
            .map_err(map_write_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))?;
        info!(user_id = %id, "user updated");
        Ok(user)
    }

    async fn remove(&self, id: UserId) -> Result<(), Error> {
        if self.users.delete(id).await.map_err(map_repository_error)? {
            info!(user_id = %id, "user deleted");
            Ok(())
        } else {
            Err(Error::not_found(USER_NOT_FOUND))
        }
    }
}
