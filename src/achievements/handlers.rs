use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{auth::services::AuthUser, error::ApiError, state::AppState};

use super::dto::{CommentRequest, LikeRequest, MessageResponse};
use super::repo_types::{AchievementComment, AchievementRecord};

pub fn achievement_routes() -> Router<AppState> {
    Router::new()
        .route("/get-achievements", get(get_achievements))
        .route("/like-achievement", post(like_achievement))
        .route("/comment-achievement", post(comment_achievement))
}

#[instrument(skip(state))]
pub async fn get_achievements(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<AchievementRecord>>, ApiError> {
    Ok(Json(state.store.list_achievements(user_id).await?))
}

#[instrument(skip(state, payload))]
pub async fn like_achievement(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<LikeRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(payload) = payload?;
    if !state.store.like_achievement(user_id, &payload.title).await? {
        return Err(ApiError::NotFound("Achievement not found".into()));
    }
    Ok(Json(MessageResponse {
        message: "Achievement liked!",
    }))
}

#[instrument(skip(state, payload))]
pub async fn comment_achievement(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<CommentRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(payload) = payload?;
    let text = payload.comment.trim();
    if text.is_empty() {
        return Err(ApiError::invalid("Comment is required"));
    }
    let comment = AchievementComment {
        user_id,
        text: text.to_string(),
    };
    if !state
        .store
        .comment_achievement(user_id, &payload.title, comment)
        .await?
    {
        return Err(ApiError::NotFound("Achievement not found".into()));
    }
    Ok(Json(MessageResponse {
        message: "Comment added successfully!",
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use uuid::Uuid;

    use crate::{
        state::AppState,
        testing::{send, TestRequest},
    };

    async fn earn_beginner(state: &AppState, user: Uuid) {
        for _ in 0..3 {
            send(state, TestRequest::post("/api/track-progress").auth(state, user)).await;
        }
    }

    #[tokio::test]
    async fn like_and_comment_append() {
        let state = AppState::fake();
        let user = Uuid::new_v4();
        earn_beginner(&state, user).await;

        for _ in 0..2 {
            let (status, _) = send(
                &state,
                TestRequest::post("/api/like-achievement")
                    .auth(&state, user)
                    .json(json!({"title": "Beginner Badge"})),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }
        for text in ["nice", "keep going"] {
            let (status, _) = send(
                &state,
                TestRequest::post("/api/comment-achievement")
                    .auth(&state, user)
                    .json(json!({"title": "Beginner Badge", "comment": text})),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (_, list) =
            send(&state, TestRequest::get("/api/get-achievements").auth(&state, user)).await;
        assert_eq!(list[0]["likes"], json!(2));
        assert_eq!(list[0]["comments"][0]["text"], json!("nice"));
        assert_eq!(list[0]["comments"][1]["text"], json!("keep going"));
    }

    #[tokio::test]
    async fn unknown_title_is_not_found() {
        let state = AppState::fake();
        let (status, body) = send(
            &state,
            TestRequest::post("/api/like-achievement")
                .auth(&state, Uuid::new_v4())
                .json(json!({"title": "Beginner Badge"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], json!("Achievement not found"));
    }

    #[tokio::test]
    async fn achievements_are_private_to_their_owner() {
        let state = AppState::fake();
        let (owner, other) = (Uuid::new_v4(), Uuid::new_v4());
        earn_beginner(&state, owner).await;

        let (_, list) =
            send(&state, TestRequest::get("/api/get-achievements").auth(&state, other)).await;
        assert_eq!(list, json!([]));
        let (status, _) = send(
            &state,
            TestRequest::post("/api/like-achievement")
                .auth(&state, other)
                .json(json!({"title": "Beginner Badge"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
