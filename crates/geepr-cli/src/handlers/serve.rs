//! Serve command handler.

use geepr_axum::{ServerConfig, bootstrap, start_server};

use crate::error::CliError;

/// Execute the serve command.
///
/// Opens the database, then serves the API until the process is stopped.
pub async fn execute(config: ServerConfig) -> Result<(), CliError> {
    let ctx = bootstrap(&config).await.map_err(|e| {
        CliError::Database(format!("{}: {e:#}", config.database_path.display()))
    })?;

    if let geepr_axum::CorsConfig::AllowOrigins(origins) = &config.cors {
        tracing::info!("CORS restricted to {}", origins.join(", "));
    }

    start_server(ctx, &config).await?;
    Ok(())
}
