//! Driving port for user account management.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Registration payload; the password is hashed before it reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Partial account update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// User use-cases called by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Create an account. Fails with `conflict` when the email is taken.
    async fn register(&self, request: RegisterUserRequest) -> Result<User, Error>;

    async fn list(&self) -> Result<Vec<User>, Error>;

    async fn get(&self, id: UserId) -> Result<User, Error>;

    /// Update an account, re-hashing the password when one is supplied.
    async fn update(&self, id: UserId, request: UpdateUserRequest) -> Result<User, Error>;

    async fn remove(&self, id: UserId) -> Result<(), Error>;
}
