//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers translate JSON payloads into domain requests and map domain
//! errors back onto status codes. Every route except registration, login and
//! the health probes requires a bearer token.

pub mod appointments;
pub mod auth;
pub mod dashboard;
pub mod doctors;
pub mod dto;
pub mod error;
pub mod health;
pub mod patients;
pub mod queue;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use crate::domain::ApiResult;

/// Register extractor configuration and every API handler on `cfg`.
///
/// The caller supplies [`state::HttpState`] as application data.
///
/// # Examples
/// ```no_run
/// use actix_web::App;
/// use frontdesk::inbound::http::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::path_config())
        .app_data(error::query_config())
        .service(auth::login)
        .service(auth::me)
        .service(users::register_user)
        .service(users::list_users)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(patients::list_patients)
        .service(patients::create_patient)
        .service(patients::get_patient)
        .service(patients::update_patient)
        .service(patients::delete_patient)
        .service(doctors::list_doctors)
        .service(doctors::create_doctor)
        .service(doctors::get_doctor)
        .service(doctors::update_doctor)
        .service(doctors::delete_doctor)
        .service(appointments::list_appointments)
        .service(appointments::create_appointment)
        .service(appointments::get_appointment)
        .service(appointments::update_appointment)
        .service(appointments::delete_appointment)
        .service(queue::list_queue)
        .service(queue::create_queue_entry)
        .service(queue::get_queue_entry)
        .service(queue::update_queue_entry)
        .service(queue::delete_queue_entry)
        .service(dashboard::get_dashboard);
}
