use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{auth::services::AuthUser, error::ApiError, state::AppState};

use super::dto::{MessageResponse, TrackProgressResponse};
use super::repo_types::ProgressRecord;

pub fn progress_routes() -> Router<AppState> {
    Router::new()
        .route("/track-progress", post(track_progress))
        .route("/get-progress", get(get_progress))
        .route("/reset-progress", post(reset_progress))
}

#[instrument(skip(state))]
pub async fn track_progress(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<TrackProgressResponse>, ApiError> {
    let step = state.store.advance_progress(user_id).await?;
    if let Some(badge) = step.badge {
        info!(%user_id, badge = badge.label(), streak = step.streak, "badge awarded");
    }
    Ok(Json(TrackProgressResponse {
        message: "Workout day recorded!",
        completed_days: step.completed_days,
        badge: step.badge.map(|b| b.label()),
        redirect: step.redirect(),
    }))
}

#[instrument(skip(state))]
pub async fn get_progress(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProgressRecord>, ApiError> {
    let progress = state
        .store
        .get_progress(user_id)
        .await?
        .unwrap_or_else(|| ProgressRecord::fresh(user_id));
    Ok(Json(progress))
}

#[instrument(skip(state))]
pub async fn reset_progress(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store.reset_progress(user_id).await?;
    info!(%user_id, "progress reset");
    Ok(Json(MessageResponse {
        message: "Progress reset successfully!",
    }))
}
