use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct FoodItemsResponse {
    pub food_items: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub foods: usize,
}
