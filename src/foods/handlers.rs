use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{auth::services::AuthUser, error::ApiError, state::AppState};

use super::dto::{FoodItemsResponse, ReloadResponse};

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/get-food-items", get(get_food_items))
        .route("/food-items/reload", post(reload_food_items))
}

#[instrument(skip(state))]
pub async fn get_food_items(
    State(state): State<AppState>,
) -> Result<Json<FoodItemsResponse>, ApiError> {
    let index = state.foods.snapshot().ok_or(ApiError::IndexUnavailable)?;
    Ok(Json(FoodItemsResponse {
        food_items: index.names(),
    }))
}

#[instrument(skip(state))]
pub async fn reload_food_items(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ReloadResponse>, ApiError> {
    if !state.config.food_db.reload_enabled {
        warn!(%user_id, "food table reload refused; FOOD_DB_RELOAD is off");
        return Err(ApiError::Forbidden("food table reload is disabled".into()));
    }
    let foods = state.foods.reload()?;
    info!(%user_id, foods, "food table reload requested");
    Ok(Json(ReloadResponse { foods }))
}
