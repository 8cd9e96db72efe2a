//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AppointmentsService, DashboardQuery, DoctorsService, LoginService, PatientsService,
    QueueService, TokenService, UsersService,
};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```no_run
/// use actix_web::web;
/// use frontdesk::inbound::http::state::HttpState;
///
/// fn register(state: HttpState) -> web::Data<HttpState> {
///     web::Data::new(state)
/// }
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub patients: Arc<dyn PatientsService>,
    pub doctors: Arc<dyn DoctorsService>,
    pub appointments: Arc<dyn AppointmentsService>,
    pub queue: Arc<dyn QueueService>,
    pub users: Arc<dyn UsersService>,
    pub login: Arc<dyn LoginService>,
    pub dashboard: Arc<dyn DashboardQuery>,
    /// Verifies bearer tokens on protected routes.
    pub tokens: Arc<dyn TokenService>,
}
