//! Route definitions and router construction.
//!
//! This module defines the HTTP routes and creates the main router.
//! Handlers delegate to the repositories held by `AxumContext`.

use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Prefix every API route is nested under.
pub const API_PREFIX: &str = "/api/v0";

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Build all API routes without the version prefix (for nesting).
///
/// The caller must apply `.with_state()` before nesting.
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        // Games API
        .route(
            "/games",
            get(handlers::games::list).post(handlers::games::create),
        )
        .route(
            "/games/{id}",
            get(handlers::games::get)
                .put(handlers::games::update)
                .delete(handlers::games::remove),
        )
        // Platforms API
        .route(
            "/platforms",
            get(handlers::platforms::list).post(handlers::platforms::create),
        )
        .route(
            "/platforms/{id}",
            get(handlers::platforms::get)
                .put(handlers::platforms::update)
                .delete(handlers::platforms::remove),
        )
        // Releases API
        .route(
            "/releases",
            get(handlers::releases::list).post(handlers::releases::create),
        )
        .route(
            "/releases/{id}",
            get(handlers::releases::get)
                .put(handlers::releases::update)
                .delete(handlers::releases::remove),
        )
        // Release/platform links
        .route(
            "/releasePlatforms",
            axum::routing::post(handlers::release_platforms::link)
                .delete(handlers::release_platforms::unlink),
        )
        .route(
            "/releasePlatforms/byReleaseId/{id}",
            get(handlers::release_platforms::by_release),
        )
        .route(
            "/releasePlatforms/byPlatformId/{id}",
            get(handlers::release_platforms::by_platform),
        )
}

/// Create the main router with all routes.
///
/// API routes are nested under [`API_PREFIX`]; `/health` sits at the root.
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/health", get(health_check))
        .nest(API_PREFIX, api_routes().with_state(state).layer(cors))
        .layer(TraceLayer::new_for_http())
}

pub(crate) async fn health_check() -> &'static str {
    "OK"
}
