//! Backend entry-point: wires REST endpoints, persistence, and OpenAPI docs.

mod server;

use actix_web::web;
use diesel::Connection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{AppSettings, ServerConfig};
use warranty_backend::inbound::http::health::HealthState;
use warranty_backend::outbound::persistence::{DbPool, PoolConfig};

/// Migrations bundled into the binary and applied at startup.
const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Apply pending migrations over a short-lived synchronous connection.
fn run_migrations(database_url: &str) -> std::io::Result<()> {
    let mut conn = diesel::pg::PgConnection::establish(database_url)
        .map_err(|e| std::io::Error::other(format!("failed to connect for migrations: {e}")))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| std::io::Error::other(format!("failed to run migrations: {e}")))?;
    if !applied.is_empty() {
        info!(count = applied.len(), "applied pending migrations");
    }
    Ok(())
}

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

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load configuration: {e}")))?;

    let bind_addr = settings
        .bind_addr()
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid bind address: {e}")))?;
    let mut config = ServerConfig::new(bind_addr);

    match settings.database_url.as_deref() {
        Some(database_url) => {
            run_migrations(database_url)?;
            let pool = DbPool::new(PoolConfig::new(database_url))
                .await
                .map_err(|e| std::io::Error::other(format!("failed to build pool: {e}")))?;
            config = config.with_db_pool(pool);
        }
        None => {
            warn!("no database URL configured; serving fixture ports only");
        }
    }

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(health_state, config)?;

    info!(addr = %bind_addr, "warranty backend listening");
    server.await
}
