//! Game handlers - CRUD operations for games.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use geepr_core::Game;
use uuid::Uuid;

use crate::dto::{GameListQuery, GameListResponse, GameRequest};
use crate::error::HttpError;
use crate::state::AppState;

/// List one page of games.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<GameListQuery>,
) -> Result<Json<GameListResponse>, HttpError> {
    let page = state
        .repos
        .games
        .list(&query.filter(), query.page(), query.sort())
        .await?;
    Ok(Json(page.into()))
}

/// Get a single game by ID.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Game>, HttpError> {
    Ok(Json(state.repos.games.get_by_id(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<GameRequest>,
) -> Result<(StatusCode, Json<Game>), HttpError> {
    req.validate()?;
    let game = state.repos.games.add(&req.into_draft()).await?;
    tracing::info!("Created game {} ({})", game.id, game.title);
    Ok((StatusCode::CREATED, Json(game)))
}

/// Replace a game.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<GameRequest>,
) -> Result<Json<Game>, HttpError> {
    req.validate()?;
    Ok(Json(state.repos.games.update(id, &req.into_draft()).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpError> {
    state.repos.games.delete(id).await?;
    tracing::info!("Deleted game {id}");
    Ok(StatusCode::OK)
}
