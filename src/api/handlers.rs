use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{ItemId, MovieDetail, TrackKind},
    store::{LoadOutcome, RecommendationState, ReplaceOutcome},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SetTimeRequest {
    pub time: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleGenreRequest {
    pub genre: String,
}

#[derive(Debug, Deserialize)]
pub struct ReplaceItemRequest {
    pub track: TrackKind,
    pub item_id: ItemId,
}

#[derive(Debug, Deserialize)]
pub struct SetDetailRequest {
    pub item_id: Option<ItemId>,
}

#[derive(Debug, Deserialize)]
pub struct PlayRequest {
    pub provider_id: i64,
}

#[derive(Debug, Serialize)]
pub struct LoadResponse {
    #[serde(flatten)]
    pub outcome: LoadOutcome,
    pub state: RecommendationState,
}

#[derive(Debug, Serialize)]
pub struct ReplaceResponse {
    #[serde(flatten)]
    pub outcome: ReplaceOutcome,
    pub state: RecommendationState,
}

#[derive(Debug, Serialize)]
pub struct PlayResponse {
    pub redirect_url: String,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Current recommendation state
pub async fn get_state(State(state): State<AppState>) -> Json<RecommendationState> {
    Json(state.store.snapshot())
}

pub async fn set_time(
    State(state): State<AppState>,
    Json(request): Json<SetTimeRequest>,
) -> Json<RecommendationState> {
    state.store.set_time(request.time);
    Json(state.store.snapshot())
}

pub async fn toggle_genre(
    State(state): State<AppState>,
    Json(request): Json<ToggleGenreRequest>,
) -> AppResult<Json<RecommendationState>> {
    let genre = request.genre.trim();
    if genre.is_empty() {
        return Err(AppError::InvalidInput(
            "Genre name cannot be empty".to_string(),
        ));
    }

    state.store.toggle_genre(genre);
    Ok(Json(state.store.snapshot()))
}

pub async fn toggle_exclude_adult(State(state): State<AppState>) -> Json<RecommendationState> {
    state.store.toggle_exclude_adult();
    Json(state.store.snapshot())
}

/// Loads both tracks; refused while the session is loading
pub async fn load_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<LoadResponse>> {
    let Some(outcome) = state.store.try_load_recommendations().await else {
        tracing::warn!(request_id = %request_id, "Load refused, another load in flight");
        return Err(AppError::Conflict(
            "Recommendations are already loading".to_string(),
        ));
    };

    tracing::info!(request_id = %request_id, outcome = ?outcome, "Load request finished");

    Ok(Json(LoadResponse {
        outcome,
        state: state.store.snapshot(),
    }))
}

pub async fn replace_item(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<ReplaceItemRequest>,
) -> Json<ReplaceResponse> {
    let outcome = state
        .store
        .replace_item(request.track, request.item_id)
        .await;

    tracing::info!(
        request_id = %request_id,
        track = %request.track,
        item_id = request.item_id,
        "Replace request finished"
    );

    Json(ReplaceResponse {
        outcome,
        state: state.store.snapshot(),
    })
}

pub async fn set_detail(
    State(state): State<AppState>,
    Json(request): Json<SetDetailRequest>,
) -> Json<RecommendationState> {
    state.store.set_detail_item(request.item_id);
    Json(state.store.snapshot())
}

/// Detail record of the currently selected item
pub async fn get_detail(State(state): State<AppState>) -> AppResult<Json<MovieDetail>> {
    let item_id = state
        .store
        .snapshot()
        .detail_item_id
        .ok_or_else(|| AppError::NotFound("No item selected".to_string()))?;

    let detail = state.service.movie_detail(item_id).await?;
    Ok(Json(detail))
}

pub async fn mark_watched(
    State(state): State<AppState>,
    Path(item_id): Path<ItemId>,
) -> AppResult<Json<RecommendationState>> {
    state.store.mark_watched(item_id).await?;
    Ok(Json(state.store.snapshot()))
}

pub async fn play(
    State(state): State<AppState>,
    Path(item_id): Path<ItemId>,
    Json(request): Json<PlayRequest>,
) -> AppResult<Json<PlayResponse>> {
    let redirect_url = state
        .service
        .play_link(item_id, request.provider_id)
        .await?;
    Ok(Json(PlayResponse { redirect_url }))
}

/// User-requested restart of the recommendation flow
pub async fn reset(State(state): State<AppState>) -> Json<RecommendationState> {
    state.store.reset();
    Json(state.store.snapshot())
}

/// Called by the authentication layer on logout
pub async fn logout(State(state): State<AppState>) -> StatusCode {
    state.store.on_session_end();
    StatusCode::NO_CONTENT
}
