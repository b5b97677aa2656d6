use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FoodDbConfig {
    pub path: PathBuf,
    /// Refuse to start when the food table cannot be loaded.
    pub required: bool,
    /// Lets any signed-in user trigger `POST /food-items/reload`.
    pub reload_enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// `None` runs against the in-memory store.
    pub database_url: Option<String>,
    pub jwt: JwtConfig,
    pub food_db: FoodDbConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty());
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "fitfolk".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "fitfolk-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
            refresh_ttl_minutes: std::env::var("JWT_REFRESH_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 14),
        };
        let food_db = FoodDbConfig {
            path: std::env::var("FOOD_DB_PATH")
                .unwrap_or_else(|_| "food_database.csv".into())
                .into(),
            required: std::env::var("FOOD_DB_REQUIRED")
                .ok()
                .and_then(|v| v.parse::<bool>().ok())
                .unwrap_or(true),
            reload_enabled: std::env::var("FOOD_DB_RELOAD")
                .ok()
                .and_then(|v| v.parse::<bool>().ok())
                .unwrap_or(false),
        };
        Ok(Self {
            database_url,
            jwt,
            food_db,
        })
    }
}
