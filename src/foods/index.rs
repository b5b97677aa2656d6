use std::{collections::HashMap, fs::File, io::Read, path::Path};

use serde::Serialize;
use tracing::debug;

pub const NAME_COLUMN: &str = "Food Name";
pub const CALORIES_COLUMN: &str = "Calories (kcal)";
pub const PROTEIN_COLUMN: &str = "Protein (g)";
pub const CARBS_COLUMN: &str = "Carbohydrates (g)";
pub const FATS_COLUMN: &str = "Fats (g)";

const REQUIRED_COLUMNS: [&str; 5] = [
    NAME_COLUMN,
    CALORIES_COLUMN,
    PROTEIN_COLUMN,
    CARBS_COLUMN,
    FATS_COLUMN,
];

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot open food table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read food table: {0}")]
    Csv(#[from] csv::Error),
    #[error("food table is missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// One row of the reference table. Nutrient values are never negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodRecord {
    pub name: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Immutable name → record lookup, shared by every request.
#[derive(Debug, Default)]
pub struct FoodIndex {
    foods: HashMap<String, FoodRecord>,
}

struct Columns {
    name: usize,
    calories: usize,
    protein: usize,
    carbs: usize,
    fats: usize,
}

impl FoodIndex {
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Builds the index from CSV text with a header row. A name seen twice
    /// keeps the later row.
    pub fn from_reader<R: Read>(source: R) -> Result<Self, LoadError> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);
        let headers = reader.headers()?.clone();
        let position = |column: &str| headers.iter().position(|h| h.trim() == column);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|&&c| position(c).is_none())
            .map(|c| c.to_string())
            .collect();
        let (Some(name), Some(calories), Some(protein), Some(carbs), Some(fats)) = (
            position(NAME_COLUMN),
            position(CALORIES_COLUMN),
            position(PROTEIN_COLUMN),
            position(CARBS_COLUMN),
            position(FATS_COLUMN),
        ) else {
            return Err(LoadError::MissingColumns(missing));
        };
        let cols = Columns { name, calories, protein, carbs, fats };

        let mut foods = HashMap::new();
        for row in reader.records() {
            let row = row?;
            let Some(name) = row.get(cols.name).filter(|n| !n.is_empty()) else {
                debug!(line = ?row.position().map(|p| p.line()), "skipping food row without a name");
                continue;
            };
            let record = FoodRecord {
                name: name.to_string(),
                calories: nutrient(row.get(cols.calories)),
                protein_g: nutrient(row.get(cols.protein)),
                carbs_g: nutrient(row.get(cols.carbs)),
                fat_g: nutrient(row.get(cols.fats)),
            };
            foods.insert(record.name.clone(), record);
        }
        Ok(Self { foods })
    }

    /// Exact, case-sensitive match.
    pub fn lookup(&self, name: &str) -> Option<&FoodRecord> {
        self.foods.get(name)
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.foods.keys().cloned().collect();
        names.sort();
        names
    }
}

// absent, non-numeric and negative cells all count as zero
fn nutrient(cell: Option<&str>) -> f64 {
    cell.and_then(|c| c.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Food Name,Calories (kcal),Protein (g),Carbohydrates (g),Fats (g)\n";

    fn index(rows: &str) -> FoodIndex {
        FoodIndex::from_reader(format!("{HEADER}{rows}").as_bytes()).expect("valid table")
    }

    #[test]
    fn builds_one_entry_per_row() {
        let idx = index("Apple,95,0.5,25,0.3\nRice,200,4,45,0.4\n");
        assert_eq!(idx.len(), 2);
        let apple = idx.lookup("Apple").expect("apple present");
        assert_eq!(apple.calories, 95.0);
        assert_eq!(apple.carbs_g, 25.0);
    }

    #[test]
    fn later_duplicate_row_wins() {
        let idx = index("Banana,100,1,27,0.4\nBanana,120,1.5,30,0.5\n");
        assert_eq!(idx.len(), 1);
        assert_eq!(idx.lookup("Banana").map(|f| f.calories), Some(120.0));
    }

    #[test]
    fn non_numeric_and_missing_cells_become_zero() {
        let idx = index("Mystery,n/a,,3,-2\nShort,10\n");
        let mystery = idx.lookup("Mystery").expect("row kept");
        assert_eq!(mystery.calories, 0.0);
        assert_eq!(mystery.protein_g, 0.0);
        assert_eq!(mystery.carbs_g, 3.0);
        assert_eq!(mystery.fat_g, 0.0);
        let short = idx.lookup("Short").expect("row kept");
        assert_eq!(short.calories, 10.0);
        assert_eq!(short.fat_g, 0.0);
    }

    #[test]
    fn lookup_is_exact() {
        let idx = index("Apple,95,0.5,25,0.3\n");
        assert!(idx.lookup("apple").is_none());
        assert!(idx.lookup(" Apple").is_none());
        assert!(idx.lookup("Apple").is_some());
    }

    #[test]
    fn missing_columns_are_reported() {
        let err = FoodIndex::from_reader("Food Name,Calories (kcal)\nApple,95\n".as_bytes())
            .unwrap_err();
        match err {
            LoadError::MissingColumns(cols) => {
                assert_eq!(cols, vec!["Protein (g)", "Carbohydrates (g)", "Fats (g)"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = FoodIndex::from_path(Path::new("/nonexistent/food_database.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn names_are_sorted() {
        let idx = index("Rice,200,4,45,0.4\nApple,95,0.5,25,0.3\n");
        assert_eq!(idx.names(), vec!["Apple", "Rice"]);
    }
}
