use tracing::info;
use uuid::Uuid;

use super::nutrition::{aggregate, MealSlots, NutritionTotals};
use super::repo_types::MealEntry;
use crate::{error::ApiError, state::AppState};

/// Totals the submission against the current food table and appends it to
/// the user's meal history. Without a usable food table nothing is stored.
pub async fn log_meal(
    st: &AppState,
    user_id: Uuid,
    slots: MealSlots,
) -> Result<MealEntry, ApiError> {
    let index = st.foods.snapshot().ok_or(ApiError::IndexUnavailable)?;
    let nutrition = aggregate(&slots, &index);
    let entry = st.store.insert_meal(user_id, &slots, nutrition).await?;
    info!(%user_id, meal_id = %entry.id, calories = nutrition.calories, "meal logged");
    Ok(entry)
}

/// Every meal of the user plus the field-wise sum of their stored totals.
/// The sum is taken over the returned entries, so it always matches them.
pub async fn logged_meals(
    st: &AppState,
    user_id: Uuid,
) -> Result<(Vec<MealEntry>, NutritionTotals), ApiError> {
    let meals = st.store.list_meals(user_id).await?;
    let overall = meals.iter().map(|m| m.nutrition).sum();
    Ok((meals, overall))
}
