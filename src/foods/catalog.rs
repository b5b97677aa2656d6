use std::{
    path::PathBuf,
    sync::{Arc, RwLock},
};

use anyhow::{anyhow, bail};
use tracing::{error, info};

use super::index::{FoodIndex, LoadError};

/// Holder of the current food index. Readers take a cheap `Arc` snapshot;
/// a reload replaces the whole index at once.
pub struct FoodCatalog {
    source: Option<PathBuf>,
    current: RwLock<Option<Arc<FoodIndex>>>,
}

impl FoodCatalog {
    pub fn new(source: Option<PathBuf>, index: Option<FoodIndex>) -> Self {
        Self {
            source,
            current: RwLock::new(index.map(Arc::new)),
        }
    }

    /// Loads the table at `path`. The catalog remembers the path for reloads
    /// even when this first load fails.
    pub fn load(path: PathBuf) -> (Self, Result<(), LoadError>) {
        match FoodIndex::from_path(&path) {
            Ok(index) => {
                info!(path = %path.display(), foods = index.len(), "food table loaded");
                (Self::new(Some(path), Some(index)), Ok(()))
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "food table failed to load");
                (Self::new(Some(path), None), Err(e))
            }
        }
    }

    pub fn from_index(index: FoodIndex) -> Self {
        Self::new(None, Some(index))
    }

    pub fn unavailable() -> Self {
        Self::new(None, None)
    }

    /// Current index, if one loaded and it holds at least one food.
    pub fn snapshot(&self) -> Option<Arc<FoodIndex>> {
        let guard = match self.current.read() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.as_ref().filter(|idx| !idx.is_empty()).cloned()
    }

    /// Rebuilds from the configured source. On failure, including a table
    /// with no foods, the previous index stays in place.
    pub fn reload(&self) -> anyhow::Result<usize> {
        let path = self
            .source
            .as_ref()
            .ok_or_else(|| anyhow!("food catalog has no source to reload from"))?;
        let index = FoodIndex::from_path(path)?;
        if index.is_empty() {
            bail!("food table at {} has no foods", path.display());
        }
        let count = index.len();
        let mut guard = match self.current.write() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(Arc::new(index));
        info!(path = %path.display(), foods = count, "food table reloaded");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str =
        "Food Name,Calories (kcal),Protein (g),Carbohydrates (g),Fats (g)\nApple,95,0.5,25,0.3\n";

    fn temp_table(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}.csv", name, uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).expect("write temp table");
        path
    }

    #[test]
    fn empty_index_is_not_usable() {
        let catalog = FoodCatalog::from_index(FoodIndex::default());
        assert!(catalog.snapshot().is_none());
        assert!(FoodCatalog::unavailable().snapshot().is_none());
    }

    #[test]
    fn failed_load_keeps_path_for_reload() {
        let path = std::env::temp_dir().join(format!("late-{}.csv", uuid::Uuid::new_v4()));
        let (catalog, result) = FoodCatalog::load(path.clone());
        assert!(result.is_err());
        assert!(catalog.snapshot().is_none());

        std::fs::write(&path, TABLE).expect("write table");
        assert_eq!(catalog.reload().expect("reload"), 1);
        assert!(catalog.snapshot().is_some());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn reload_swaps_whole_index_and_old_snapshots_survive() {
        let path = temp_table("swap", TABLE);
        let (catalog, result) = FoodCatalog::load(path.clone());
        result.expect("initial load");
        let before = catalog.snapshot().expect("loaded");

        std::fs::write(
            &path,
            "Food Name,Calories (kcal),Protein (g),Carbohydrates (g),Fats (g)\nRice,200,4,45,0.4\nEgg,70,6,1,5\n",
        )
        .expect("rewrite table");
        assert_eq!(catalog.reload().expect("reload"), 2);

        assert!(before.lookup("Apple").is_some());
        let after = catalog.snapshot().expect("reloaded");
        assert!(after.lookup("Apple").is_none());
        assert!(after.lookup("Rice").is_some());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn failed_reload_keeps_previous_index() {
        let path = temp_table("keep", TABLE);
        let (catalog, _) = FoodCatalog::load(path.clone());
        std::fs::write(&path, "Food Name\nApple\n").expect("break table");
        assert!(catalog.reload().is_err());
        assert!(catalog.snapshot().expect("still loaded").lookup("Apple").is_some());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn reload_of_empty_table_keeps_previous_index() {
        let path = temp_table("empty", TABLE);
        let (catalog, _) = FoodCatalog::load(path.clone());
        std::fs::write(
            &path,
            "Food Name,Calories (kcal),Protein (g),Carbohydrates (g),Fats (g)\n",
        )
        .expect("empty table");
        assert!(catalog.reload().is_err());
        assert!(catalog.snapshot().expect("still loaded").lookup("Apple").is_some());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn reload_without_source_fails() {
        assert!(FoodCatalog::unavailable().reload().is_err());
    }
}
