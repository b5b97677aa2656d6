mod dto;
pub mod handlers;
pub mod nutrition;
pub mod repo_types;
mod services;

use crate::state::AppState;
use axum::Router;

pub use nutrition::{MealSlots, NutritionTotals};
pub use repo_types::{MealEntry, MealEntryRow};

pub fn router() -> Router<AppState> {
    handlers::meal_routes()
}
