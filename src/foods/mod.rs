pub mod catalog;
mod dto;
pub mod handlers;
pub mod index;

use crate::state::AppState;
use axum::Router;

pub use catalog::FoodCatalog;
pub use index::{FoodIndex, FoodRecord};

pub fn router() -> Router<AppState> {
    handlers::food_routes()
}
