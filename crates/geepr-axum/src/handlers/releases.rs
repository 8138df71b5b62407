//! Game release handlers.
//!
//! Release writes also rewrite the release's platform links; the release
//! repository runs both in one transaction.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use geepr_core::GameRelease;
use uuid::Uuid;

use crate::dto::{ReleaseListQuery, ReleaseListResponse, ReleaseRequest};
use crate::error::HttpError;
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ReleaseListQuery>,
) -> Result<Json<ReleaseListResponse>, HttpError> {
    let page = state
        .repos
        .releases
        .list(&query.filter(), query.page(), query.sort())
        .await?;
    Ok(Json(page.into()))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GameRelease>, HttpError> {
    Ok(Json(state.repos.releases.get_by_id(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<ReleaseRequest>,
) -> Result<(StatusCode, Json<GameRelease>), HttpError> {
    req.validate()?;
    let game_id = req.required_game_id()?;
    let release = state.repos.releases.add(&req.into_draft(game_id)).await?;
    tracing::info!(
        "Created release {} of game {} on {} platform(s)",
        release.id,
        release.game_id,
        release.platform_ids.len()
    );
    Ok((StatusCode::CREATED, Json(release)))
}

/// Replace a release and its platform set.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ReleaseRequest>,
) -> Result<Json<GameRelease>, HttpError> {
    req.validate()?;
    let game_id = match req.game_id.filter(|game_id| !game_id.is_nil()) {
        Some(game_id) => game_id,
        None => state.repos.releases.get_by_id(id).await?.game_id,
    };
    Ok(Json(
        state
            .repos
            .releases
            .update(id, &req.into_draft(game_id))
            .await?,
    ))
}

/// Delete a release together with its platform links.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpError> {
    state.repos.releases.delete(id).await?;
    tracing::info!("Deleted release {id}");
    Ok(StatusCode::OK)
}
