mod dto;
pub mod handlers;
pub mod repo_types;

use crate::state::AppState;
use axum::Router;

pub use repo_types::{AchievementComment, AchievementRecord, AchievementRow, NewAchievement};

pub fn router() -> Router<AppState> {
    handlers::achievement_routes()
}
