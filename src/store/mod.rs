mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    achievements::{AchievementComment, AchievementRecord, NewAchievement},
    auth::repo_types::User,
    fitness::{repo_types::Assessment, FitnessLevel},
    meals::{MealEntry, MealSlots, NutritionTotals},
    progress::{machine::Step, ProgressRecord},
    sleep::repo_types::SleepEntry,
};

/// Per-user document storage behind every endpoint.
///
/// Each method is all-or-nothing: an `Err` means nothing was written.
/// Errors are passed through untouched; callers do not retry.
#[async_trait]
pub trait FitnessStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn create_user(&self, email: &str, password_hash: &str) -> anyhow::Result<User>;

    /// Appends a meal; the store assigns id and timestamp.
    async fn insert_meal(
        &self,
        user_id: Uuid,
        slots: &MealSlots,
        nutrition: NutritionTotals,
    ) -> anyhow::Result<MealEntry>;
    async fn list_meals(&self, user_id: Uuid) -> anyhow::Result<Vec<MealEntry>>;

    async fn get_progress(&self, user_id: Uuid) -> anyhow::Result<Option<ProgressRecord>>;
    /// Applies one completed workout as a single atomic read-modify-write,
    /// appending the badge achievement in the same write.
    async fn advance_progress(&self, user_id: Uuid) -> anyhow::Result<Step>;
    async fn reset_progress(&self, user_id: Uuid) -> anyhow::Result<ProgressRecord>;

    async fn list_achievements(&self, user_id: Uuid) -> anyhow::Result<Vec<AchievementRecord>>;
    /// Likes the newest achievement of `user_id` titled `title`. `false` when none matches.
    async fn like_achievement(&self, user_id: Uuid, title: &str) -> anyhow::Result<bool>;
    async fn comment_achievement(
        &self,
        user_id: Uuid,
        title: &str,
        comment: AchievementComment,
    ) -> anyhow::Result<bool>;

    /// Appends a sleep log and, when given, its reward achievement together.
    async fn insert_sleep(
        &self,
        user_id: Uuid,
        date: Option<String>,
        sleep_hours: f64,
        reward: Option<NewAchievement>,
    ) -> anyhow::Result<SleepEntry>;
    async fn list_sleep(&self, user_id: Uuid) -> anyhow::Result<Vec<SleepEntry>>;

    async fn upsert_assessment(
        &self,
        user_id: Uuid,
        level: FitnessLevel,
        data: serde_json::Value,
    ) -> anyhow::Result<()>;
    async fn get_assessment(&self, user_id: Uuid) -> anyhow::Result<Option<Assessment>>;
}
