//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! exchange credentials for a bearer token without knowing the backing
//! infrastructure.

use async_trait::async_trait;

use crate::domain::{Error, IssuedToken, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and issue a token.
    ///
    /// Unknown emails and wrong passwords fail with the same `unauthorized`
    /// error so callers cannot tell which part was wrong.
    async fn login(&self, credentials: &LoginCredentials) -> Result<IssuedToken, Error>;
}
