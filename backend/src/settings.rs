//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `FRONTDESK_*` environment variables or a
//! configuration file, in that order of precedence.

use std::net::SocketAddr;

use chrono::Duration;
use ortho_config::OrthoConfig;
use rand::RngCore;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use zeroize::Zeroizing;

use crate::outbound::security::MIN_SECRET_LEN;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while turning settings into runtime configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid bind address `{value}`: {message}")]
    InvalidBindAddr { value: String, message: String },
    #[error("token lifetime must be positive, got {minutes} minutes")]
    InvalidTokenTtl { minutes: i64 },
    #[error("JWT secret must be at least {min} bytes, got {actual}")]
    SecretTooShort { min: usize, actual: usize },
    #[error("FRONTDESK_JWT_SECRET is not set and ephemeral secrets are not allowed")]
    MissingSecret,
}

/// Runtime settings for the front-desk server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FRONTDESK")]
pub struct AppSettings {
    /// PostgreSQL connection string; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// HS256 signing secret for access tokens.
    pub jwt_secret: Option<String>,
    /// Access token lifetime in minutes.
    pub token_ttl_minutes: Option<i64>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Permit a random per-process secret in release builds.
    #[ortho_config(default = false)]
    pub allow_ephemeral_secret: bool,
}

impl AppSettings {
    /// Parse the configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                message: err.to_string(),
            })
    }

    /// Access token lifetime, 60 minutes unless configured.
    pub fn token_ttl(&self) -> Result<Duration, SettingsError> {
        let minutes = self.token_ttl_minutes.unwrap_or(DEFAULT_TOKEN_TTL_MINUTES);
        if minutes <= 0 {
            return Err(SettingsError::InvalidTokenTtl { minutes });
        }
        Ok(Duration::minutes(minutes))
    }

    /// Pool size, defaulting to 10.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Resolve the token signing secret for this build.
    ///
    /// Debug builds fall back to an ephemeral secret when none is configured.
    pub fn signing_secret(&self) -> Result<Zeroizing<Vec<u8>>, SettingsError> {
        self.signing_secret_with(cfg!(debug_assertions))
    }

    /// Resolve the signing secret, treating `dev_build` as permission to
    /// generate one.
    ///
    /// A configured secret shorter than [`MIN_SECRET_LEN`] bytes is always
    /// rejected. Tokens signed with an ephemeral secret stop verifying when
    /// the process restarts.
    pub fn signing_secret_with(
        &self,
        dev_build: bool,
    ) -> Result<Zeroizing<Vec<u8>>, SettingsError> {
        if let Some(secret) = self.jwt_secret.as_deref() {
            let bytes = Zeroizing::new(secret.as_bytes().to_vec());
            if bytes.len() < MIN_SECRET_LEN {
                return Err(SettingsError::SecretTooShort {
                    min: MIN_SECRET_LEN,
                    actual: bytes.len(),
                });
            }
            return Ok(bytes);
        }
        if dev_build || self.allow_ephemeral_secret {
            warn!("using ephemeral JWT secret (dev only)");
            let mut bytes = Zeroizing::new(vec![0_u8; MIN_SECRET_LEN * 2]);
            rand::thread_rng().fill_bytes(&mut bytes);
            return Ok(bytes);
        }
        Err(SettingsError::MissingSecret)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and secret resolution.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "FRONTDESK_DATABASE_URL",
        "FRONTDESK_BIND_ADDR",
        "FRONTDESK_JWT_SECRET",
        "FRONTDESK_TOKEN_TTL_MINUTES",
        "FRONTDESK_DB_MAX_CONNECTIONS",
        "FRONTDESK_ALLOW_EPHEMERAL_SECRET",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("frontdesk")]).expect("config should load")
    }

    fn settings(secret: Option<&str>, allow_ephemeral: bool) -> AppSettings {
        AppSettings {
            database_url: None,
            bind_addr: None,
            jwt_secret: secret.map(str::to_owned),
            token_ttl_minutes: None,
            db_max_connections: None,
            allow_ephemeral_secret: allow_ephemeral,
        }
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert!(settings.database_url.is_none());
        assert!(!settings.allow_ephemeral_secret);
        assert_eq!(
            settings.bind_addr().expect("default address"),
            SocketAddr::from(([0, 0, 0, 0], 8080))
        );
        assert_eq!(settings.token_ttl(), Ok(Duration::minutes(60)));
        assert_eq!(settings.db_max_connections(), DEFAULT_DB_MAX_CONNECTIONS);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "FRONTDESK_DATABASE_URL",
                Some("postgres://clinic@localhost/frontdesk".to_owned()),
            ),
            ("FRONTDESK_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            ("FRONTDESK_JWT_SECRET", Some("x".repeat(40))),
            ("FRONTDESK_TOKEN_TTL_MINUTES", Some("15".to_owned())),
            ("FRONTDESK_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            ("FRONTDESK_ALLOW_EPHEMERAL_SECRET", None),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://clinic@localhost/frontdesk")
        );
        assert_eq!(
            settings.bind_addr().expect("configured address"),
            SocketAddr::from(([127, 0, 0, 1], 9090))
        );
        assert_eq!(settings.token_ttl(), Ok(Duration::minutes(15)));
        assert_eq!(settings.db_max_connections(), 4);
        assert_eq!(
            settings.signing_secret_with(false).expect("secret").len(),
            40
        );
    }

    #[rstest]
    #[case(false, false, Err(SettingsError::MissingSecret))]
    #[case(true, false, Ok(MIN_SECRET_LEN * 2))]
    #[case(false, true, Ok(MIN_SECRET_LEN * 2))]
    fn missing_secret_depends_on_build_and_opt_in(
        #[case] dev_build: bool,
        #[case] allow_ephemeral: bool,
        #[case] expected: Result<usize, SettingsError>,
    ) {
        let resolved = settings(None, allow_ephemeral)
            .signing_secret_with(dev_build)
            .map(|secret| secret.len());
        assert_eq!(resolved, expected);
    }

    #[rstest]
    fn short_secret_is_rejected_even_in_dev_builds() {
        let resolved = settings(Some("short"), true).signing_secret_with(true);
        assert_eq!(
            resolved.map(|secret| secret.len()),
            Err(SettingsError::SecretTooShort {
                min: MIN_SECRET_LEN,
                actual: 5
            })
        );
    }

    #[rstest]
    fn ephemeral_secrets_differ_between_calls() {
        let settings = settings(None, true);
        let first = settings.signing_secret_with(false).expect("secret");
        let second = settings.signing_secret_with(false).expect("secret");
        assert_ne!(*first, *second);
    }

    #[rstest]
    #[case(Some("not an address"), None)]
    #[case(None, Some(0))]
    fn invalid_values_are_reported(#[case] bind: Option<&str>, #[case] ttl: Option<i64>) {
        let mut settings = settings(None, false);
        settings.bind_addr = bind.map(str::to_owned);
        settings.token_ttl_minutes = ttl;
        let failed = settings.bind_addr().is_err() || settings.token_ttl().is_err();
        assert!(failed);
    }
}
