use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ProgressRecord {
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub completed_days: i32,
    pub badge: Option<String>,
}

impl ProgressRecord {
    pub fn fresh(user_id: Uuid) -> Self {
        Self {
            user_id,
            completed_days: 0,
            badge: None,
        }
    }
}
