use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use time::OffsetDateTime;
use uuid::Uuid;

/// Title and description of an achievement about to be appended.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAchievement {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementComment {
    pub user_id: Uuid,
    pub text: String,
}

#[derive(Debug, FromRow)]
pub struct AchievementRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub likes: i64,
    pub comments: Json<Vec<AchievementComment>>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievementRecord {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub likes: i64,
    pub comments: Vec<AchievementComment>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<AchievementRow> for AchievementRecord {
    fn from(r: AchievementRow) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            title: r.title,
            description: r.description,
            likes: r.likes,
            comments: r.comments.0,
            created_at: r.created_at,
        }
    }
}

impl AchievementRecord {
    pub fn new(user_id: Uuid, achievement: NewAchievement) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: achievement.title,
            description: achievement.description,
            likes: 0,
            comments: Vec::new(),
            created_at: OffsetDateTime::now_utc(),
        }
    }
}
