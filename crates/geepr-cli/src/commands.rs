//! Main commands enum.

use std::path::PathBuf;

use clap::Subcommand;
use geepr_axum::ServerConfig;
use geepr_axum::bootstrap::{DEFAULT_DATABASE_PATH, DEFAULT_PORT};

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the catalog API server
    Serve {
        /// Port to listen on (loopback only)
        #[arg(short, long, env = "GEEPR_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Path to the SQLite database file, created when missing
        #[arg(long, env = "GEEPR_DB", default_value = DEFAULT_DATABASE_PATH)]
        db: PathBuf,
        /// Origin allowed by CORS; repeat for several. Any origin when omitted
        #[arg(
            long = "allow-origin",
            env = "GEEPR_ALLOWED_ORIGINS",
            value_delimiter = ','
        )]
        allow_origins: Vec<String>,
    },
}

impl Commands {
    /// Build the server configuration for `serve`.
    pub fn server_config(&self) -> ServerConfig {
        match self {
            Self::Serve {
                port,
                db,
                allow_origins,
            } => ServerConfig {
                port: *port,
                database_path: db.clone(),
                ..ServerConfig::with_defaults()
            }
            .with_allowed_origins(allow_origins.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Cli;
    use clap::Parser;
    use geepr_axum::CorsConfig;

    fn serve_config(args: &[&str]) -> ServerConfig {
        let cli = Cli::parse_from(args);
        cli.command.unwrap().server_config()
    }

    #[test]
    fn test_serve_defaults() {
        let config = serve_config(&["geepr", "serve"]);
        assert_eq!(config, ServerConfig::with_defaults());
    }

    #[test]
    fn test_serve_overrides() {
        let config = serve_config(&[
            "geepr",
            "serve",
            "--port",
            "8080",
            "--db",
            "/tmp/catalog.db",
            "--allow-origin",
            "http://localhost:3000",
            "--allow-origin",
            "https://geepr.example",
        ]);

        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path, PathBuf::from("/tmp/catalog.db"));
        assert_eq!(
            config.cors,
            CorsConfig::AllowOrigins(vec![
                "http://localhost:3000".to_string(),
                "https://geepr.example".to_string(),
            ])
        );
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(Cli::try_parse_from(["geepr", "serve", "--port", "70000"]).is_err());
    }
}
