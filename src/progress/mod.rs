mod dto;
pub mod handlers;
pub mod machine;
pub mod repo_types;

use crate::state::AppState;
use axum::Router;

pub use repo_types::ProgressRecord;

pub fn router() -> Router<AppState> {
    handlers::progress_routes()
}
