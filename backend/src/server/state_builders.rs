//! Builders wiring repositories into the domain services held by
//! [`HttpState`].

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    AppointmentRepository, CredentialHasher, DoctorRepository, PatientRepository,
    QueueRepository, TokenService, UserRepository,
};
use crate::domain::{
    AppointmentsServiceImpl, DashboardQueryService, DoctorsServiceImpl, LoginServiceImpl,
    PatientsServiceImpl, QueueServiceImpl, UsersServiceImpl,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::MemoryStore;
use crate::outbound::persistence::{
    DbPool, DieselAppointmentRepository, DieselDoctorRepository, DieselPatientRepository,
    DieselQueueRepository, DieselUserRepository,
};
use crate::outbound::security::{Argon2CredentialHasher, JwtTokenService};

use super::ServerConfig;

/// One repository per entity, shared by every service that reads it.
struct Repositories<P, D, A, Q, U> {
    patients: Arc<P>,
    doctors: Arc<D>,
    appointments: Arc<A>,
    queue: Arc<Q>,
    users: Arc<U>,
}

fn wire_services<P, D, A, Q, U>(
    repos: Repositories<P, D, A, Q, U>,
    tokens: Arc<dyn TokenService>,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    P: PatientRepository + 'static,
    D: DoctorRepository + 'static,
    A: AppointmentRepository + 'static,
    Q: QueueRepository + 'static,
    U: UserRepository + 'static,
{
    let Repositories {
        patients,
        doctors,
        appointments,
        queue,
        users,
    } = repos;
    let hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2CredentialHasher::new());

    HttpState {
        patients: Arc::new(PatientsServiceImpl::new(
            Arc::clone(&patients),
            Arc::clone(&clock),
        )),
        doctors: Arc::new(DoctorsServiceImpl::new(Arc::clone(&doctors))),
        appointments: Arc::new(AppointmentsServiceImpl::new(
            appointments,
            Arc::clone(&patients),
            Arc::clone(&doctors),
        )),
        queue: Arc::new(QueueServiceImpl::new(
            Arc::clone(&queue),
            Arc::clone(&patients),
            Arc::clone(&clock),
        )),
        users: Arc::new(UsersServiceImpl::new(
            Arc::clone(&users),
            Arc::clone(&hasher),
        )),
        login: Arc::new(LoginServiceImpl::new(users, hasher, Arc::clone(&tokens))),
        dashboard: Arc::new(DashboardQueryService::new(doctors, queue, patients, clock)),
        tokens,
    }
}

/// Wire every service over a single in-memory store.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use chrono::Duration;
/// use mockable::DefaultClock;
/// use frontdesk::outbound::memory::MemoryStore;
/// use frontdesk::outbound::security::JwtTokenService;
/// use frontdesk::server::memory_http_state;
///
/// let clock = Arc::new(DefaultClock);
/// let tokens = Arc::new(JwtTokenService::new(
///     &[7; 32],
///     Duration::minutes(60),
///     clock.clone(),
/// ));
/// let _state = memory_http_state(MemoryStore::new(), tokens, clock);
/// ```
pub fn memory_http_state(
    store: MemoryStore,
    tokens: Arc<dyn TokenService>,
    clock: Arc<dyn Clock>,
) -> HttpState {
    let store = Arc::new(store);
    wire_services(
        Repositories {
            patients: Arc::clone(&store),
            doctors: Arc::clone(&store),
            appointments: Arc::clone(&store),
            queue: Arc::clone(&store),
            users: store,
        },
        tokens,
        clock,
    )
}

/// Wire every service over the Diesel repositories sharing `pool`.
pub fn diesel_http_state(
    pool: &DbPool,
    tokens: Arc<dyn TokenService>,
    clock: Arc<dyn Clock>,
) -> HttpState {
    wire_services(
        Repositories {
            patients: Arc::new(DieselPatientRepository::new(pool.clone())),
            doctors: Arc::new(DieselDoctorRepository::new(pool.clone())),
            appointments: Arc::new(DieselAppointmentRepository::new(pool.clone())),
            queue: Arc::new(DieselQueueRepository::new(pool.clone())),
            users: Arc::new(DieselUserRepository::new(pool.clone())),
        },
        tokens,
        clock,
    )
}

/// Build the handler state for `config`, choosing PostgreSQL when a pool is
/// attached and the in-memory store otherwise.
pub fn build_http_state(config: &ServerConfig) -> HttpState {
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(
        &config.signing_secret,
        config.token_ttl,
        Arc::clone(&config.clock),
    ));
    match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            diesel_http_state(pool, tokens, Arc::clone(&config.clock))
        }
        None => {
            info!("no database configured; using in-memory repositories");
            memory_http_state(MemoryStore::new(), tokens, Arc::clone(&config.clock))
        }
    }
}
