//! Backend entry-point: loads settings, prepares storage and serves the API.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use frontdesk::inbound::http::health::HealthState;
use frontdesk::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use frontdesk::server::{ServerConfig, create_server};
use frontdesk::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let token_ttl = settings.token_ttl().map_err(std::io::Error::other)?;
    let secret = settings.signing_secret().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(bind_addr, secret, token_ttl);
    if let Some(database_url) = settings.database_url.as_deref() {
        run_pending_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
        )
        .await
        .map_err(std::io::Error::other)?;
        info!("database migrations applied");
        config = config.with_db_pool(pool);
    } else {
        warn!("FRONTDESK_DATABASE_URL not set; data will not survive a restart");
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
