use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::nutrition::{MealSlots, NutritionTotals};
use super::repo_types::MealEntry;

/// A slot arrives either as one food name or as a list of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SlotFoods {
    One(String),
    Many(Vec<String>),
}

impl SlotFoods {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            SlotFoods::One(food) => vec![food],
            SlotFoods::Many(foods) => foods,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LogMealRequest {
    pub meals: Option<BTreeMap<String, SlotFoods>>,
}

impl LogMealRequest {
    /// Normalizes every slot to a list; `None` when the `meals` field is absent.
    pub fn into_slots(self) -> Option<MealSlots> {
        self.meals.map(|meals| {
            meals
                .into_iter()
                .map(|(slot, foods)| (slot, foods.into_vec()))
                .collect()
        })
    }
}

#[derive(Debug, Serialize)]
pub struct LogMealResponse {
    pub message: &'static str,
    pub nutrition: NutritionTotals,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct LoggedMealsResponse {
    pub meals: Vec<MealEntry>,
    pub overall_nutrition: NutritionTotals,
}
