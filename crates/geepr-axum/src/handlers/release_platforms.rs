//! Release/platform link handlers.

use std::collections::BTreeSet;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use geepr_core::GameReleasePlatform;
use uuid::Uuid;

use crate::error::HttpError;
use crate::state::AppState;

/// Platform ids a release is available on. Unknown releases yield `[]`.
pub async fn by_release(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BTreeSet<Uuid>>, HttpError> {
    Ok(Json(
        state
            .repos
            .release_platforms
            .platform_ids_for_release(id)
            .await?,
    ))
}

/// Release ids available on a platform. Unknown platforms yield `[]`.
pub async fn by_platform(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BTreeSet<Uuid>>, HttpError> {
    Ok(Json(
        state
            .repos
            .release_platforms
            .release_ids_for_platform(id)
            .await?,
    ))
}

/// Body: `{ "releaseId": ..., "platformId": ... }`.
pub async fn link(
    State(state): State<AppState>,
    Json(link): Json<GameReleasePlatform>,
) -> Result<StatusCode, HttpError> {
    state.repos.release_platforms.link(link).await?;
    tracing::debug!(
        "Linked release {} to platform {}",
        link.game_release_id,
        link.platform_id
    );
    Ok(StatusCode::CREATED)
}

/// Body: `{ "releaseId": ..., "platformId": ... }`.
pub async fn unlink(
    State(state): State<AppState>,
    Json(link): Json<GameReleasePlatform>,
) -> Result<StatusCode, HttpError> {
    state.repos.release_platforms.unlink(link).await?;
    tracing::debug!(
        "Unlinked release {} from platform {}",
        link.game_release_id,
        link.platform_id
    );
    Ok(StatusCode::OK)
}
