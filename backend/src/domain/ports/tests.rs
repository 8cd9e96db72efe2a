//! Behavioural checks for the port error types and generated mocks.

use super::*;
use crate::domain::{AuthenticatedIdentity, UserId};
use rstest::rstest;

#[rstest]
#[case(RepositoryError::connection("refused").to_string(), "repository connection failed: refused")]
#[case(RepositoryError::duplicate("users_email_key").to_string(), "duplicate value: users_email_key")]
#[case(
    RepositoryError::still_referenced("patient 1").to_string(),
    "record is still referenced: patient 1"
)]
#[case(TokenError::expired().to_string(), "token has expired")]
#[case(
    CredentialHashError::malformed_hash("no salt").to_string(),
    "stored password hash is malformed: no salt"
)]
fn port_errors_render_their_context(#[case] rendered: String, #[case] expected: &str) {
    assert_eq!(rendered, expected);
}

#[test]
fn token_mock_round_trips_identity() {
    let identity = AuthenticatedIdentity {
        user_id: UserId::new(4),
        email: "desk@clinic.test".to_owned(),
    };
    let mut tokens = MockTokenService::new();
    let expected = identity.clone();
    tokens
        .expect_verify()
        .withf(|token| token == "opaque")
        .returning(move |_| Ok(expected.clone()));

    let verified = tokens.verify("opaque").expect("verified");

    assert_eq!(verified, identity);
}

#[tokio::test]
async fn repository_mocks_are_object_safe() {
    let mut patients = MockPatientRepository::new();
    patients.expect_list().returning(|| Ok(Vec::new()));
    let port: std::sync::Arc<dyn PatientRepository> = std::sync::Arc::new(patients);

    assert!(port.list().await.expect("listed").is_empty());
}
