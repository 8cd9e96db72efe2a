//! Credential adapters: Argon2 password hashing and HS256 bearer tokens.

mod argon2_hasher;
mod jwt;

pub use argon2_hasher::Argon2CredentialHasher;
pub use jwt::{JwtTokenService, MIN_SECRET_LEN};
