//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every handler in the inbound HTTP layer
//! - **Schemas**: request and response bodies plus the error wrappers
//!   ([`ErrorSchema`], [`ErrorCodeSchema`]) that keep utoipa out of the domain
//! - **Security**: the `BearerAuth` JWT scheme, required by default and
//!   lifted on registration, login and the health probes
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::appointments::{CreateAppointmentBody, UpdateAppointmentBody};
use crate::inbound::http::auth::{LoginRequest, LoginResponse, MeResponse};
use crate::inbound::http::dashboard::{DashboardBody, DoctorAvailabilityBody};
use crate::inbound::http::doctors::{CreateDoctorBody, UpdateDoctorBody};
use crate::inbound::http::dto::{AppointmentBody, DoctorBody, PatientBody, QueueEntryBody, UserBody};
use crate::inbound::http::patients::{CreatePatientBody, UpdatePatientBody};
use crate::inbound::http::queue::{CreateQueueEntryBody, UpdateQueueEntryBody};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{RegisterUserBody, UpdateUserBody};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token issued by POST /auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Front desk API",
        description = "Clinic front-desk backend: patients, doctors, appointments and the walk-in queue."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::me,
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::patients::list_patients,
        crate::inbound::http::patients::create_patient,
        crate::inbound::http::patients::get_patient,
        crate::inbound::http::patients::update_patient,
        crate::inbound::http::patients::delete_patient,
        crate::inbound::http::doctors::list_doctors,
        crate::inbound::http::doctors::create_doctor,
        crate::inbound::http::doctors::get_doctor,
        crate::inbound::http::doctors::update_doctor,
        crate::inbound::http::doctors::delete_doctor,
        crate::inbound::http::appointments::list_appointments,
        crate::inbound::http::appointments::create_appointment,
        crate::inbound::http::appointments::get_appointment,
        crate::inbound::http::appointments::update_appointment,
        crate::inbound::http::appointments::delete_appointment,
        crate::inbound::http::queue::list_queue,
        crate::inbound::http::queue::create_queue_entry,
        crate::inbound::http::queue::get_queue_entry,
        crate::inbound::http::queue::update_queue_entry,
        crate::inbound::http::queue::delete_queue_entry,
        crate::inbound::http::dashboard::get_dashboard,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        LoginResponse,
        MeResponse,
        RegisterUserBody,
        UpdateUserBody,
        UserBody,
        CreatePatientBody,
        UpdatePatientBody,
        PatientBody,
        CreateDoctorBody,
        UpdateDoctorBody,
        DoctorBody,
        CreateAppointmentBody,
        UpdateAppointmentBody,
        AppointmentBody,
        CreateQueueEntryBody,
        UpdateQueueEntryBody,
        QueueEntryBody,
        DoctorAvailabilityBody,
        DashboardBody
    )),
    tags(
        (name = "auth", description = "Login and token introspection"),
        (name = "users", description = "Front-desk user accounts"),
        (name = "patients", description = "Patient registry"),
        (name = "doctors", description = "Doctors and their duty hours"),
        (name = "appointments", description = "Appointment booking"),
        (name = "queue", description = "Walk-in visit queue"),
        (name = "dashboard", description = "Aggregated front-desk view"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema registration and path coverage.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn user_body_does_not_document_a_password() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user = schemas.get("UserBody").expect("UserBody schema");

        assert_object_schema_has_field(user, "email");
        if let RefOr::T(Schema::Object(obj)) = user {
            assert!(!obj.properties.contains_key("password"));
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.as_ref().expect("components");
        assert!(components.security_schemes.contains_key("BearerAuth"));
    }

    #[rstest]
    #[case("/auth/login")]
    #[case("/auth/me")]
    #[case("/users/{id}")]
    #[case("/patients")]
    #[case("/doctors/{id}")]
    #[case("/appointments")]
    #[case("/queue/{id}")]
    #[case("/dashboard")]
    #[case("/health/ready")]
    fn documents_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }
}
