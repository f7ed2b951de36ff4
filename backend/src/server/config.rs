//! Server configuration.
//!
//! Settings load through OrthoConfig (environment, CLI, file) and are then
//! assembled into a [`ServerConfig`] carrying the constructed store handle,
//! so the pool is built once at startup and injected explicitly.

use std::net::{AddrParseError, IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::DbPool;

const DEFAULT_HOST: &str = "0.0.0.0";

/// Settings controlling the HTTP listener and the user store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REGISTRY")]
pub struct ServerSettings {
    /// Port the service listens on.
    #[ortho_config(default = 4001)]
    pub port: u16,
    /// Listen address; defaults to all interfaces.
    pub host: Option<String>,
    /// PostgreSQL connection URL. When absent the service falls back to the
    /// in-memory store.
    pub database_url: Option<String>,
}

impl ServerSettings {
    /// Return the configured host, falling back to the default.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Resolve the socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns the parse failure when the configured host is not a valid IP
    /// address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.host().parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Assembled configuration handed to `create_server`.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a configuration binding the given address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the persistence adapter.
    ///
    /// Without a pool the server falls back to the in-memory repository.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
