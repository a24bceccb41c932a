use sqlx::SqlitePool;

use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;

/// Shared application state. The pool is the injected store handle every
/// operation runs against; there is no module-level session factory.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: SqlitePool,
    pub cors_config: CorsConfig,
}

pub async fn init_app_state() -> AppState {
    AppState {
        db: init_db_pool().await,
        cors_config: CorsConfig::from_env(),
    }
}
