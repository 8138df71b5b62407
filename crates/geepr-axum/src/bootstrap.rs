//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the Axum web adapter. All concrete implementations are instantiated here.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use anyhow::Result;
use geepr_core::Repos;
use geepr_db::{CoreFactory, setup_database};

/// Port the server listens on unless configured otherwise.
pub const DEFAULT_PORT: u16 = 5500;

/// Database file used unless configured otherwise.
pub const DEFAULT_DATABASE_PATH: &str = "./geepr.db";

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Port for the HTTP server, bound on the loopback interface.
    pub port: u16,
    /// Path to the `SQLite` database file.
    pub database_path: PathBuf,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Create config with default port and database path.
    pub fn with_defaults() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            cors: CorsConfig::default(),
        }
    }

    /// Set CORS to allow specific origins. An empty list keeps the current setting.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        if !origins.is_empty() {
            self.cors = CorsConfig::AllowOrigins(origins);
        }
        self
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::LOCALHOST, self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Application context for the Axum adapter.
///
/// Holds the repositories every handler works through.
pub struct AxumContext {
    pub repos: Repos,
}

impl AxumContext {
    pub fn new(repos: Repos) -> Self {
        Self { repos }
    }
}

/// Open the database and wire the repositories.
pub async fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    tracing::info!(
        target: "geepr.paths",
        database_path = %config.database_path.display(),
        "Axum bootstrap resolved paths"
    );

    let pool = setup_database(&config.database_path).await?;
    Ok(AxumContext::new(CoreFactory::build_repos(pool)))
}

/// Serve the catalog API until the process is stopped.
///
/// Fails with an I/O error when the listen address cannot be bound.
pub async fn start_server(ctx: AxumContext, config: &ServerConfig) -> std::io::Result<()> {
    use tokio::net::TcpListener;
    use tracing::info;

    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("geepr catalog API listening on http://{}", addr);

    axum::serve(listener, app).await
}
