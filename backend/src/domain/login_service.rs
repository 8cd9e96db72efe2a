//! Credential login implementing the [`LoginService`] driving port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{
    CredentialHashError, CredentialHasher, LoginService, TokenService, UserRepository,
};
use crate::domain::service_support::map_repository_error;
use crate::domain::{AuthenticatedIdentity, Error, IssuedToken, LoginCredentials};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Login service checking stored hashes and issuing bearer tokens.
#[derive(Clone)]
pub struct LoginServiceImpl<U> {
    users: Arc<U>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<dyn TokenService>,
}

impl<U> LoginServiceImpl<U> {
    /// Create the service from the user store, hasher and token issuer.
    pub fn new(
        users: Arc<U>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

#[async_trait]
impl<U> LoginService for LoginServiceImpl<U>
where
    U: UserRepository,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<IssuedToken, Error> {
        let Some(record) = self
            .users
            .find_credentials_by_email(credentials.email())
            .await
            .map_err(map_repository_error)?
        else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = match self
            .hasher
            .verify(credentials.password(), &record.password_hash)
        {
            Ok(matches) => matches,
            Err(CredentialHashError::MalformedHash { message }) => {
                warn!(user_id = %record.user.id, %message, "stored password hash is unreadable");
                false
            }
            Err(err) => {
                error!(error = %err, "password verification failed");
                return Err(Error::internal("password verification failed"));
            }
        };
        if !matches {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        let token = self
            .tokens
            .issue(&AuthenticatedIdentity {
                user_id: record.user.id,
                email: record.user.email.to_string(),
            })
            .map_err(|err| {
                error!(error = %err, "token issuance failed");
                Error::internal("token issuance failed")
            })?;
        info!(user_id = %record.user.id, "user logged in");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockCredentialHasher, MockTokenService, MockUserRepository};
    use crate::domain::{EmailAddress, ErrorCode, User, UserCredentialsRecord, UserId};
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    #[fixture]
    fn credentials() -> LoginCredentials {
        LoginCredentials::try_from_parts("desk@clinic.test", "s3cret").expect("valid credentials")
    }

    fn record() -> UserCredentialsRecord {
        UserCredentialsRecord {
            user: User {
                id: UserId::new(7),
                name: "Front Desk".to_owned(),
                email: EmailAddress::new("desk@clinic.test").expect("valid email"),
            },
            password_hash: "$argon2id$stored".to_owned(),
        }
    }

    fn known_user() -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users
            .expect_find_credentials_by_email()
            .withf(|email| email == "desk@clinic.test")
            .times(1)
            .return_once(|_| Ok(Some(record())));
        users
    }

    fn verifier(result: Result<bool, CredentialHashError>) -> MockCredentialHasher {
        let mut hasher = MockCredentialHasher::new();
        hasher
            .expect_verify()
            .times(1)
            .return_once(move |_, _| result);
        hasher
    }

    fn no_tokens() -> MockTokenService {
        let mut tokens = MockTokenService::new();
        tokens.expect_issue().times(0);
        tokens
    }

    #[rstest]
    #[tokio::test]
    async fn valid_credentials_issue_token(credentials: LoginCredentials) {
        let mut tokens = MockTokenService::new();
        tokens
            .expect_issue()
            .withf(|identity| {
                identity.user_id == UserId::new(7) && identity.email == "desk@clinic.test"
            })
            .times(1)
            .return_once(|_| {
                Ok(IssuedToken {
                    access_token: "signed".to_owned(),
                    expires_at: Utc
                        .with_ymd_and_hms(2024, 5, 1, 10, 0, 0)
                        .single()
                        .expect("valid timestamp"),
                })
            });

        let service = LoginServiceImpl::new(
            Arc::new(known_user()),
            Arc::new(verifier(Ok(true))),
            Arc::new(tokens),
        );
        let token = service.login(&credentials).await.expect("login succeeds");

        assert_eq!(token.access_token, "signed");
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_email_and_wrong_password_look_the_same(credentials: LoginCredentials) {
        let mut users = MockUserRepository::new();
        users
            .expect_find_credentials_by_email()
            .times(1)
            .return_once(|_| Ok(None));
        let unknown = LoginServiceImpl::new(
            Arc::new(users),
            Arc::new(MockCredentialHasher::new()),
            Arc::new(no_tokens()),
        )
        .login(&credentials)
        .await
        .expect_err("unknown email");

        let wrong = LoginServiceImpl::new(
            Arc::new(known_user()),
            Arc::new(verifier(Ok(false))),
            Arc::new(no_tokens()),
        )
        .login(&credentials)
        .await
        .expect_err("wrong password");

        assert_eq!(unknown.code(), ErrorCode::Unauthorized);
        assert_eq!(unknown.code(), wrong.code());
        assert_eq!(unknown.message(), wrong.message());
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_stored_hash_is_unauthorized(credentials: LoginCredentials) {
        let service = LoginServiceImpl::new(
            Arc::new(known_user()),
            Arc::new(verifier(Err(CredentialHashError::malformed_hash("bad salt")))),
            Arc::new(no_tokens()),
        );
        let error = service.login(&credentials).await.expect_err("rejected");

        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }
}
