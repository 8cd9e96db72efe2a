//! Port for issuing and verifying bearer tokens.

use crate::domain::{AuthenticatedIdentity, IssuedToken};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenError {
        /// The token was well formed but its lifetime has passed.
        Expired => "token has expired",
        /// The token is malformed or its signature does not verify.
        Invalid { message: String } => "token is invalid: {message}",
        /// Signing a new token failed.
        Issue { message: String } => "token could not be issued: {message}",
    }
}

/// Issues signed, time-limited tokens and verifies presented ones.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Sign a token carrying `identity`.
    fn issue(&self, identity: &AuthenticatedIdentity) -> Result<IssuedToken, TokenError>;

    /// Verify signature and expiry, returning the carried identity.
    fn verify(&self, token: &str) -> Result<AuthenticatedIdentity, TokenError>;
}
