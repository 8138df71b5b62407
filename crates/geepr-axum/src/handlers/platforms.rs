//! Platform handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use geepr_core::Platform;
use uuid::Uuid;

use crate::dto::{PlatformListQuery, PlatformListResponse, PlatformRequest};
use crate::error::HttpError;
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<PlatformListQuery>,
) -> Result<Json<PlatformListResponse>, HttpError> {
    let page = state
        .repos
        .platforms
        .list(&query.filter(), query.page(), query.sort())
        .await?;
    Ok(Json(page.into()))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Platform>, HttpError> {
    Ok(Json(state.repos.platforms.get_by_id(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<PlatformRequest>,
) -> Result<(StatusCode, Json<Platform>), HttpError> {
    req.validate()?;
    let platform = state.repos.platforms.add(&req.into_draft()).await?;
    tracing::info!("Created platform {} ({})", platform.id, platform.short_name);
    Ok((StatusCode::CREATED, Json(platform)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<PlatformRequest>,
) -> Result<Json<Platform>, HttpError> {
    req.validate()?;
    Ok(Json(
        state.repos.platforms.update(id, &req.into_draft()).await?,
    ))
}

/// Delete a platform. Fails while any release is still linked to it.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpError> {
    state.repos.platforms.delete(id).await?;
    tracing::info!("Deleted platform {id}");
    Ok(StatusCode::OK)
}
