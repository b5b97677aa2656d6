use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use anyhow::{anyhow, bail};
use async_trait::async_trait;
use sqlx::types::Json;
use time::OffsetDateTime;
use uuid::Uuid;

use super::FitnessStore;
use crate::{
    achievements::{AchievementComment, AchievementRecord, NewAchievement},
    auth::repo_types::User,
    fitness::{repo_types::Assessment, FitnessLevel},
    meals::{MealEntry, MealSlots, NutritionTotals},
    progress::{machine, machine::Step, ProgressRecord},
    sleep::repo_types::SleepEntry,
};

#[derive(Default)]
struct Documents {
    users: Vec<User>,
    meals: Vec<MealEntry>,
    progress: HashMap<Uuid, ProgressRecord>,
    achievements: Vec<AchievementRecord>,
    sleep: Vec<SleepEntry>,
    assessments: HashMap<Uuid, Assessment>,
}

impl Documents {
    fn newest_achievement(&mut self, user_id: Uuid, title: &str) -> Option<&mut AchievementRecord> {
        self.achievements
            .iter_mut()
            .rev()
            .find(|a| a.user_id == user_id && a.title == title)
    }
}

/// Process-local store. Every operation runs under one lock, so each call
/// is atomic with respect to the others.
#[derive(Default)]
pub struct MemoryStore {
    docs: Mutex<Documents>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn docs(&self) -> anyhow::Result<MutexGuard<'_, Documents>> {
        self.docs
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))
    }
}

#[async_trait]
impl FitnessStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self.docs()?.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.docs()?.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> anyhow::Result<User> {
        let mut docs = self.docs()?;
        if docs.users.iter().any(|u| u.email == email) {
            bail!("duplicate email {email}");
        }
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        docs.users.push(user.clone());
        Ok(user)
    }

    async fn insert_meal(
        &self,
        user_id: Uuid,
        slots: &MealSlots,
        nutrition: NutritionTotals,
    ) -> anyhow::Result<MealEntry> {
        let entry = MealEntry {
            id: Uuid::new_v4(),
            user_id,
            meals: slots.clone(),
            nutrition,
            timestamp: OffsetDateTime::now_utc(),
        };
        self.docs()?.meals.push(entry.clone());
        Ok(entry)
    }

    async fn list_meals(&self, user_id: Uuid) -> anyhow::Result<Vec<MealEntry>> {
        Ok(self
            .docs()?
            .meals
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_progress(&self, user_id: Uuid) -> anyhow::Result<Option<ProgressRecord>> {
        Ok(self.docs()?.progress.get(&user_id).cloned())
    }

    async fn advance_progress(&self, user_id: Uuid) -> anyhow::Result<Step> {
        let mut docs = self.docs()?;
        let record = docs
            .progress
            .entry(user_id)
            .or_insert_with(|| ProgressRecord::fresh(user_id));
        let step = machine::advance(record.completed_days);
        record.completed_days = step.completed_days;
        record.badge = step.badge.map(|b| b.label().to_string());
        if let Some(achievement) = step.achievement() {
            docs.achievements
                .push(AchievementRecord::new(user_id, achievement));
        }
        Ok(step)
    }

    async fn reset_progress(&self, user_id: Uuid) -> anyhow::Result<ProgressRecord> {
        let record = ProgressRecord::fresh(user_id);
        self.docs()?.progress.insert(user_id, record.clone());
        Ok(record)
    }

    async fn list_achievements(&self, user_id: Uuid) -> anyhow::Result<Vec<AchievementRecord>> {
        Ok(self
            .docs()?
            .achievements
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn like_achievement(&self, user_id: Uuid, title: &str) -> anyhow::Result<bool> {
        let mut docs = self.docs()?;
        Ok(match docs.newest_achievement(user_id, title) {
            Some(a) => {
                a.likes += 1;
                true
            }
            None => false,
        })
    }

    async fn comment_achievement(
        &self,
        user_id: Uuid,
        title: &str,
        comment: AchievementComment,
    ) -> anyhow::Result<bool> {
        let mut docs = self.docs()?;
        Ok(match docs.newest_achievement(user_id, title) {
            Some(a) => {
                a.comments.push(comment);
                true
            }
            None => false,
        })
    }

    async fn insert_sleep(
        &self,
        user_id: Uuid,
        date: Option<String>,
        sleep_hours: f64,
        reward: Option<NewAchievement>,
    ) -> anyhow::Result<SleepEntry> {
        let entry = SleepEntry {
            id: Uuid::new_v4(),
            user_id,
            date,
            sleep_hours,
            created_at: OffsetDateTime::now_utc(),
        };
        let mut docs = self.docs()?;
        docs.sleep.push(entry.clone());
        if let Some(achievement) = reward {
            docs.achievements
                .push(AchievementRecord::new(user_id, achievement));
        }
        Ok(entry)
    }

    async fn list_sleep(&self, user_id: Uuid) -> anyhow::Result<Vec<SleepEntry>> {
        Ok(self
            .docs()?
            .sleep
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn upsert_assessment(
        &self,
        user_id: Uuid,
        level: FitnessLevel,
        data: serde_json::Value,
    ) -> anyhow::Result<()> {
        self.docs()?.assessments.insert(
            user_id,
            Assessment {
                user_id,
                level: level.label().to_string(),
                data: Json(data),
                updated_at: OffsetDateTime::now_utc(),
            },
        );
        Ok(())
    }

    async fn get_assessment(&self, user_id: Uuid) -> anyhow::Result<Option<Assessment>> {
        Ok(self.docs()?.assessments.get(&user_id).cloned())
    }
}
