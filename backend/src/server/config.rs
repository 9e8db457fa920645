//! Server configuration objects and helpers.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use warranty_backend::outbound::persistence::DbPool;

/// Default listen address when none is configured.
pub(crate) const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Application settings layered from environment, file, and CLI.
///
/// Environment variables use the `WARRANTY_` prefix, e.g.
/// `WARRANTY_DATABASE_URL` and `WARRANTY_BIND_ADDR`.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WARRANTY")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string; fixtures are used when absent.
    pub database_url: Option<String>,
}

impl AppSettings {
    /// Return the configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration for the given listen address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, the server uses database-backed implementations for
    /// every warranty port; without it the fixture implementations serve
    /// smoke tests and local development.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
