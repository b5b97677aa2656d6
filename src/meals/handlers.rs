use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{auth::services::AuthUser, error::ApiError, state::AppState};

use super::dto::{LogMealRequest, LogMealResponse, LoggedMealsResponse};
use super::services;

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/log-meal", post(log_meal))
        .route("/get-logged-meals", get(get_logged_meals))
}

#[instrument(skip(state, body))]
pub async fn log_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    body: Result<Json<LogMealRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LogMealResponse>), ApiError> {
    let Json(body) = body?;
    let slots = body
        .into_slots()
        .ok_or_else(|| ApiError::invalid("Missing 'meals' field"))?;
    let entry = services::log_meal(&state, user_id, slots).await?;
    Ok((
        StatusCode::CREATED,
        Json(LogMealResponse {
            message: "Meal logged successfully!",
            nutrition: entry.nutrition,
            timestamp: entry.timestamp,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn get_logged_meals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<LoggedMealsResponse>, ApiError> {
    let (meals, overall_nutrition) = services::logged_meals(&state, user_id).await?;
    Ok(Json(LoggedMealsResponse {
        meals,
        overall_nutrition,
    }))
}
