use std::{
    collections::BTreeMap,
    iter::Sum,
    ops::{Add, AddAssign},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::foods::{FoodIndex, FoodRecord};

/// Meal slot name ("breakfast", "lunch", ...) → food names in the order given.
pub type MealSlots = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl From<&FoodRecord> for NutritionTotals {
    fn from(f: &FoodRecord) -> Self {
        Self {
            calories: f.calories,
            protein: f.protein_g,
            carbs: f.carbs_g,
            fats: f.fat_g,
        }
    }
}

impl Add for NutritionTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fats: self.fats + rhs.fats,
        }
    }
}

impl AddAssign for NutritionTotals {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for NutritionTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl<'a> Sum<&'a NutritionTotals> for NutritionTotals {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Sums the nutrients of every food named in `slots`. A food listed twice
/// counts twice; names missing from the index contribute nothing.
///
/// Records are folded in name order, so the result does not depend on how
/// foods are arranged within or across slots.
pub fn aggregate(slots: &MealSlots, index: &FoodIndex) -> NutritionTotals {
    let mut records: Vec<&FoodRecord> = slots
        .iter()
        .flat_map(|(slot, foods)| foods.iter().map(move |food| (slot, food)))
        .filter_map(|(slot, food)| {
            let record = index.lookup(food);
            if record.is_none() {
                debug!(%slot, %food, "unknown food skipped");
            }
            record
        })
        .collect();
    records.sort_unstable_by(|a, b| a.name.cmp(&b.name));
    records.into_iter().map(NutritionTotals::from).sum()
}
