use serde::Serialize;
use sqlx::{types::Json, FromRow};
use time::OffsetDateTime;
use uuid::Uuid;

use super::nutrition::{MealSlots, NutritionTotals};

#[derive(Debug, FromRow)]
pub struct MealEntryRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub slots: Json<MealSlots>,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub created_at: OffsetDateTime,
}

/// One logged meal. Never updated after insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealEntry {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub meals: MealSlots,
    pub nutrition: NutritionTotals,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl From<MealEntryRow> for MealEntry {
    fn from(r: MealEntryRow) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            meals: r.slots.0,
            nutrition: NutritionTotals {
                calories: r.calories,
                protein: r.protein,
                carbs: r.carbs,
                fats: r.fats,
            },
            timestamp: r.created_at,
        }
    }
}
