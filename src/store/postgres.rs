use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, types::Json, PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use super::FitnessStore;
use crate::{
    achievements::{AchievementComment, AchievementRecord, AchievementRow, NewAchievement},
    auth::repo_types::User,
    fitness::{repo_types::Assessment, FitnessLevel},
    meals::{MealEntry, MealEntryRow, MealSlots, NutritionTotals},
    progress::{machine, machine::Step, ProgressRecord},
    sleep::repo_types::SleepEntry,
};

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("connect to database")?;
        Ok(Self { db })
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.db)
            .await
            .context("run migrations")?;
        info!("migrations applied");
        Ok(())
    }
}

async fn insert_achievement_tx(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    achievement: &NewAchievement,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO achievements (id, user_id, title, description)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&achievement.title)
    .bind(&achievement.description)
    .execute(&mut **tx)
    .await
    .context("insert achievement")?;
    Ok(())
}

#[async_trait]
impl FitnessStore for PgStore {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, email, password_hash, created_at FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find user by id")?;
        Ok(user)
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.db)
        .await
        .context("create user")?;
        Ok(user)
    }

    async fn insert_meal(
        &self,
        user_id: Uuid,
        slots: &MealSlots,
        nutrition: NutritionTotals,
    ) -> anyhow::Result<MealEntry> {
        let row = sqlx::query_as::<_, MealEntryRow>(
            r#"
            INSERT INTO meal_entries (id, user_id, slots, calories, protein, carbs, fats)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, slots, calories, protein, carbs, fats, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(Json(slots))
        .bind(nutrition.calories)
        .bind(nutrition.protein)
        .bind(nutrition.carbs)
        .bind(nutrition.fats)
        .fetch_one(&self.db)
        .await
        .context("insert meal entry")?;
        Ok(row.into())
    }

    async fn list_meals(&self, user_id: Uuid) -> anyhow::Result<Vec<MealEntry>> {
        let rows = sqlx::query_as::<_, MealEntryRow>(
            r#"
            SELECT id, user_id, slots, calories, protein, carbs, fats, created_at
            FROM meal_entries
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .context("list meal entries")?;
        Ok(rows.into_iter().map(MealEntry::from).collect())
    }

    async fn get_progress(&self, user_id: Uuid) -> anyhow::Result<Option<ProgressRecord>> {
        let progress = sqlx::query_as::<_, ProgressRecord>(
            r#"SELECT user_id, completed_days, badge FROM progress WHERE user_id = $1"#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("get progress")?;
        Ok(progress)
    }

    async fn advance_progress(&self, user_id: Uuid) -> anyhow::Result<Step> {
        let mut tx = self.db.begin().await.context("begin tx")?;

        sqlx::query(
            r#"
            INSERT INTO progress (user_id, completed_days)
            VALUES ($1, 0)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .context("ensure progress row")?;

        // row lock serializes concurrent workouts for the same user
        let (current,): (i32,) = sqlx::query_as(
            r#"SELECT completed_days FROM progress WHERE user_id = $1 FOR UPDATE"#,
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .context("lock progress row")?;

        let step = machine::advance(current);

        sqlx::query(
            r#"
            UPDATE progress
               SET completed_days = $2, badge = $3, updated_at = now()
             WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(step.completed_days)
        .bind(step.badge.map(|b| b.label()))
        .execute(&mut *tx)
        .await
        .context("update progress")?;

        if let Some(achievement) = step.achievement() {
            insert_achievement_tx(&mut tx, user_id, &achievement).await?;
        }

        tx.commit().await.context("commit tx")?;
        Ok(step)
    }

    async fn reset_progress(&self, user_id: Uuid) -> anyhow::Result<ProgressRecord> {
        let progress = sqlx::query_as::<_, ProgressRecord>(
            r#"
            INSERT INTO progress (user_id, completed_days, badge)
            VALUES ($1, 0, NULL)
            ON CONFLICT (user_id)
            DO UPDATE SET completed_days = 0, badge = NULL, updated_at = now()
            RETURNING user_id, completed_days, badge
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await
        .context("reset progress")?;
        Ok(progress)
    }

    async fn list_achievements(&self, user_id: Uuid) -> anyhow::Result<Vec<AchievementRecord>> {
        let rows = sqlx::query_as::<_, AchievementRow>(
            r#"
            SELECT id, user_id, title, description, likes, comments, created_at
            FROM achievements
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .context("list achievements")?;
        Ok(rows.into_iter().map(AchievementRecord::from).collect())
    }

    async fn like_achievement(&self, user_id: Uuid, title: &str) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE achievements SET likes = likes + 1
             WHERE id = (
                SELECT id FROM achievements
                 WHERE user_id = $1 AND title = $2
                 ORDER BY created_at DESC
                 LIMIT 1
             )
            "#,
        )
        .bind(user_id)
        .bind(title)
        .execute(&self.db)
        .await
        .context("like achievement")?;
        Ok(result.rows_affected() > 0)
    }

    async fn comment_achievement(
        &self,
        user_id: Uuid,
        title: &str,
        comment: AchievementComment,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE achievements SET comments = comments || $3
             WHERE id = (
                SELECT id FROM achievements
                 WHERE user_id = $1 AND title = $2
                 ORDER BY created_at DESC
                 LIMIT 1
             )
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(Json(vec![comment]))
        .execute(&self.db)
        .await
        .context("comment achievement")?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_sleep(
        &self,
        user_id: Uuid,
        date: Option<String>,
        sleep_hours: f64,
        reward: Option<NewAchievement>,
    ) -> anyhow::Result<SleepEntry> {
        let mut tx = self.db.begin().await.context("begin tx")?;
        let entry = sqlx::query_as::<_, SleepEntry>(
            r#"
            INSERT INTO sleep_logs (id, user_id, date, sleep_hours)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, date, sleep_hours, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(date)
        .bind(sleep_hours)
        .fetch_one(&mut *tx)
        .await
        .context("insert sleep log")?;

        if let Some(achievement) = reward {
            insert_achievement_tx(&mut tx, user_id, &achievement).await?;
        }
        tx.commit().await.context("commit tx")?;
        Ok(entry)
    }

    async fn list_sleep(&self, user_id: Uuid) -> anyhow::Result<Vec<SleepEntry>> {
        let rows = sqlx::query_as::<_, SleepEntry>(
            r#"
            SELECT id, user_id, date, sleep_hours, created_at
            FROM sleep_logs
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .context("list sleep logs")?;
        Ok(rows)
    }

    async fn upsert_assessment(
        &self,
        user_id: Uuid,
        level: FitnessLevel,
        data: serde_json::Value,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO fitness_assessments (user_id, level, data)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id)
            DO UPDATE SET level = EXCLUDED.level, data = EXCLUDED.data, updated_at = now()
            "#,
        )
        .bind(user_id)
        .bind(level.label())
        .bind(Json(data))
        .execute(&self.db)
        .await
        .context("upsert fitness assessment")?;
        Ok(())
    }

    async fn get_assessment(&self, user_id: Uuid) -> anyhow::Result<Option<Assessment>> {
        let row = sqlx::query_as::<_, Assessment>(
            r#"
            SELECT user_id, level, data, updated_at
            FROM fitness_assessments
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("get fitness assessment")?;
        Ok(row)
    }
}
