use crate::adapter::config::AppConfig;
use crate::adapter::web::app_state::AppState;
use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

pub struct AppInitializer;

impl AppInitializer {
    pub async fn initialize(config: AppConfig) -> Result<Arc<AppState>, AppInitializerError> {
        let pool = PgPool::connect(&config.database_url)
            .await
            .map_err(|e| AppInitializerError::DatabaseInitError(e.to_string()))?;

        info!(
            default_policy = %config.transactional.default_policy,
            strict_mode = config.transactional.strict_mode,
            "transactional defaults loaded"
        );

        Ok(Arc::new(AppState::new(
            pool,
            config.transactional,
            Arc::new(config.declarations),
        )))
    }
}

#[derive(Debug, Error)]
pub enum AppInitializerError {
    #[error("Failed to initialize database: {0}")]
    DatabaseInitError(String),
}
