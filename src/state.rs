use crate::config::AppConfig;
use crate::foods::FoodCatalog;
use crate::store::{FitnessStore, MemoryStore, PgStore};
use anyhow::Context;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FitnessStore>,
    pub config: Arc<AppConfig>,
    pub foods: Arc<FoodCatalog>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let config = Arc::new(config);

        let (foods, loaded) = FoodCatalog::load(config.food_db.path.clone());
        if let Err(e) = loaded {
            if config.food_db.required {
                return Err(e).context("load food database");
            }
            warn!("starting without a food database; meal logging is disabled until a reload succeeds");
        }

        let store = match &config.database_url {
            Some(url) => {
                let pg = PgStore::connect(url).await?;
                pg.migrate().await?;
                Arc::new(pg) as Arc<dyn FitnessStore>
            }
            None => {
                warn!("DATABASE_URL not set; using in-memory store, data is lost on exit");
                Arc::new(MemoryStore::new()) as Arc<dyn FitnessStore>
            }
        };

        Ok(Self::from_parts(store, config, Arc::new(foods)))
    }

    pub fn from_parts(
        store: Arc<dyn FitnessStore>,
        config: Arc<AppConfig>,
        foods: Arc<FoodCatalog>,
    ) -> Self {
        Self {
            store,
            config,
            foods,
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::config::{FoodDbConfig, JwtConfig};
        use crate::foods::FoodIndex;

        let index = FoodIndex::from_reader(
            "Food Name,Calories (kcal),Protein (g),Carbohydrates (g),Fats (g)\n\
             Apple,95,0.5,25,0.25\n\
             Rice,200,4,45,0.5\n\
             Egg,70,6,1,5\n"
                .as_bytes(),
        )
        .expect("fixture food table");

        let config = Arc::new(AppConfig {
            database_url: None,
            jwt: JwtConfig {
                secret: "test".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
                refresh_ttl_minutes: 60,
            },
            food_db: FoodDbConfig {
                path: "food_database.csv".into(),
                required: false,
                reload_enabled: true,
            },
        });

        Self::from_parts(
            Arc::new(MemoryStore::new()),
            config,
            Arc::new(FoodCatalog::from_index(index)),
        )
    }

    #[cfg(test)]
    pub fn with_foods(mut self, foods: FoodCatalog) -> Self {
        self.foods = Arc::new(foods);
        self
    }
}
