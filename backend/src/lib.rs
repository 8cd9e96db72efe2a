//! Front-desk clinic backend library modules.
//!
//! - [`domain`]: entities, ports and the services implementing them
//! - [`inbound`]: actix-web handlers
//! - [`outbound`]: PostgreSQL, in-memory and credential adapters
//! - [`server`]: application assembly shared by `main` and tests

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
