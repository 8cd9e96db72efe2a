//! Shared helpers for the in-memory and PostgreSQL integration suites.

use std::sync::Arc;

use actix_web::http::header;
use chrono::Duration;
use frontdesk::domain::AuthenticatedIdentity;
use frontdesk::domain::UserId;
use frontdesk::domain::ports::TokenService;
use frontdesk::inbound::http::state::HttpState;
use frontdesk::outbound::memory::MemoryStore;
use frontdesk::outbound::security::JwtTokenService;
use frontdesk::server::memory_http_state;
use mockable::{Clock, DefaultClock};

mod cluster_skip;

pub use cluster_skip::handle_cluster_setup_failure;

pub const SECRET: &[u8] = b"integration-suite-signing-secret!";

pub fn clock() -> Arc<dyn Clock> {
    Arc::new(DefaultClock)
}

pub fn token_service(clock: Arc<dyn Clock>) -> Arc<dyn TokenService> {
    Arc::new(JwtTokenService::new(SECRET, Duration::minutes(60), clock))
}

/// Handler state over a fresh in-memory store.
pub fn memory_state() -> HttpState {
    let clock = clock();
    memory_http_state(MemoryStore::new(), token_service(Arc::clone(&clock)), clock)
}

/// Bearer header for an arbitrary front-desk identity.
pub fn bearer(state: &HttpState) -> (header::HeaderName, String) {
    let issued = state
        .tokens
        .issue(&AuthenticatedIdentity {
            user_id: UserId::new(1),
            email: "desk@clinic.test".to_owned(),
        })
        .expect("token issued");
    (
        header::AUTHORIZATION,
        format!("Bearer {}", issued.access_token),
    )
}

