use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::{
    achievements::NewAchievement, auth::services::AuthUser, error::ApiError, input,
    state::AppState,
};

use super::repo_types::SleepEntry;

/// A night at least this long earns a "Well Rested" achievement.
pub const WELL_RESTED_HOURS: f64 = 8.0;

#[derive(Debug, Serialize)]
pub struct LogSleepResponse {
    pub message: &'static str,
    pub entry: SleepEntry,
    pub achievement: Option<String>,
}

pub fn sleep_routes() -> Router<AppState> {
    Router::new()
        .route("/log-sleep", post(log_sleep))
        .route("/get-sleep", get(get_sleep))
}

fn reward_for(sleep_hours: f64) -> Option<NewAchievement> {
    (sleep_hours >= WELL_RESTED_HOURS).then(|| NewAchievement {
        title: "Well Rested".to_string(),
        description: format!("You logged {sleep_hours} hours of sleep. Great recovery!"),
    })
}

#[instrument(skip(state, payload))]
pub async fn log_sleep(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<LogSleepResponse>), ApiError> {
    let Json(body) = payload?;
    let sleep_hours = input::amount(&body, "sleep_hours")?;
    let date = body.get("date").and_then(Value::as_str).map(str::to_string);

    let reward = reward_for(sleep_hours);
    let achievement = reward.as_ref().map(|r| r.title.clone());
    let entry = state
        .store
        .insert_sleep(user_id, date, sleep_hours, reward)
        .await?;
    info!(%user_id, sleep_hours, rewarded = achievement.is_some(), "sleep logged");

    Ok((
        StatusCode::CREATED,
        Json(LogSleepResponse {
            message: "Sleep data logged successfully!",
            entry,
            achievement,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn get_sleep(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<SleepEntry>>, ApiError> {
    Ok(Json(state.store.list_sleep(user_id).await?))
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

    #[tokio::test]
    async fn long_night_earns_an_achievement() {
        let state = AppState::fake();
        let user = Uuid::new_v4();

        let (status, body) = send(
            &state,
            TestRequest::post("/api/log-sleep")
                .auth(&state, user)
                .json(json!({"date": "2025-03-01", "sleep_hours": "8.5"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["achievement"], json!("Well Rested"));

        let (status, _) = send(
            &state,
            TestRequest::post("/api/log-sleep")
                .auth(&state, user)
                .json(json!({"sleep_hours": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, logs) = send(&state, TestRequest::get("/api/get-sleep").auth(&state, user)).await;
        assert_eq!(logs.as_array().unwrap().len(), 2);
        assert_eq!(logs[0]["date"], json!("2025-03-01"));

        let (_, achievements) =
            send(&state, TestRequest::get("/api/get-achievements").auth(&state, user)).await;
        assert_eq!(achievements.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn non_numeric_hours_record_nothing() {
        let state = AppState::fake();
        let user = Uuid::new_v4();
        let (status, _) = send(
            &state,
            TestRequest::post("/api/log-sleep")
                .auth(&state, user)
                .json(json!({"sleep_hours": "a while"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(state.store.list_sleep(user).await.unwrap().is_empty());
    }
}
