use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{auth::services::AuthUser, error::ApiError, input, state::AppState};

use super::level::{FitnessLevel, PlanDay};

#[derive(Debug, Serialize)]
pub struct AssessmentResponse {
    pub message: &'static str,
    pub fitness_level: FitnessLevel,
}

#[derive(Debug, Serialize)]
pub struct LevelResponse {
    pub fitness_level: FitnessLevel,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub fitness_level: FitnessLevel,
    pub workout_plan: &'static [PlanDay],
}

pub fn fitness_routes() -> Router<AppState> {
    Router::new()
        .route("/fitness-assessment", post(fitness_assessment))
        .route("/get-fitness-level", get(get_fitness_level))
        .route("/workout-plan", get(get_workout_plan))
}

async fn current_level(state: &AppState, user_id: Uuid) -> Result<FitnessLevel, ApiError> {
    let assessment = state.store.get_assessment(user_id).await?.ok_or_else(|| {
        ApiError::invalid("No fitness level found. Please complete the assessment first.")
    })?;
    FitnessLevel::from_label(&assessment.level).ok_or_else(|| {
        warn!(%user_id, level = %assessment.level, "stored fitness level not recognised");
        ApiError::Internal(anyhow::anyhow!("unknown stored fitness level {}", assessment.level))
    })
}

#[instrument(skip(state, payload))]
pub async fn fitness_assessment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AssessmentResponse>, ApiError> {
    let Json(body) = payload?;
    let pushups = input::count(&body, "pushups")?;
    let squats = input::count(&body, "squats")?;
    let plank_seconds = input::count(&body, "plank_seconds")?;

    let level = FitnessLevel::assess(pushups, squats, plank_seconds);
    state.store.upsert_assessment(user_id, level, body).await?;
    info!(%user_id, level = level.label(), "fitness assessed");

    Ok(Json(AssessmentResponse {
        message: "Assessment Completed!",
        fitness_level: level,
    }))
}

#[instrument(skip(state))]
pub async fn get_fitness_level(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<LevelResponse>, ApiError> {
    Ok(Json(LevelResponse {
        fitness_level: current_level(&state, user_id).await?,
    }))
}

#[instrument(skip(state))]
pub async fn get_workout_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PlanResponse>, ApiError> {
    let level = current_level(&state, user_id).await?;
    Ok(Json(PlanResponse {
        fitness_level: level,
        workout_plan: level.plan(),
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

    #[tokio::test]
    async fn assessment_drives_level_and_plan() {
        let state = AppState::fake();
        let user = Uuid::new_v4();

        let (status, _) =
            send(&state, TestRequest::get("/api/workout-plan").auth(&state, user)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &state,
            TestRequest::post("/api/fitness-assessment")
                .auth(&state, user)
                .json(json!({"pushups": "15", "squats": 25, "plank_seconds": 45})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fitness_level"], json!("Intermediate"));

        let (_, level) =
            send(&state, TestRequest::get("/api/get-fitness-level").auth(&state, user)).await;
        assert_eq!(level["fitness_level"], json!("Intermediate"));

        let (_, plan) =
            send(&state, TestRequest::get("/api/workout-plan").auth(&state, user)).await;
        assert_eq!(plan["workout_plan"].as_array().unwrap().len(), 5);
        assert_eq!(plan["workout_plan"][0]["day"], json!("Day 1"));
    }

    #[tokio::test]
    async fn non_numeric_assessment_records_nothing() {
        let state = AppState::fake();
        let user = Uuid::new_v4();
        let (status, body) = send(
            &state,
            TestRequest::post("/api/fitness-assessment")
                .auth(&state, user)
                .json(json!({"pushups": "lots", "squats": 25})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("pushups"));
        assert!(state.store.get_assessment(user).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn reassessment_replaces_level() {
        let state = AppState::fake();
        let user = Uuid::new_v4();
        for (pushups, expected) in [(5, "Beginner"), (40, "Advanced")] {
            let (_, body) = send(
                &state,
                TestRequest::post("/api/fitness-assessment")
                    .auth(&state, user)
                    .json(json!({"pushups": pushups, "squats": 40, "plank_seconds": 90})),
            )
            .await;
            assert_eq!(body["fitness_level"], json!(expected));
        }
        let (_, level) =
            send(&state, TestRequest::get("/api/get-fitness-level").auth(&state, user)).await;
        assert_eq!(level["fitness_level"], json!("Advanced"));
    }
}
