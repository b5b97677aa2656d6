use sqlx::{types::Json, FromRow};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Assessment {
    pub user_id: Uuid,
    pub level: String,
    pub data: Json<serde_json::Value>,
    pub updated_at: OffsetDateTime,
}
