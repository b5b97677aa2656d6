pub mod handlers;
pub mod level;
pub mod repo_types;

use crate::state::AppState;
use axum::Router;

pub use level::FitnessLevel;

pub fn router() -> Router<AppState> {
    handlers::fitness_routes()
}
