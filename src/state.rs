use sqlx::PgPool;

use crate::config::cors::CorsConfig;
use crate::config::database::{DatabaseConfig, init_db_pool};
use crate::config::server::ServerConfig;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub server_config: ServerConfig,
    pub cors_config: CorsConfig,
}

pub async fn init_app_state() -> AppState {
    let database_config = DatabaseConfig::from_env();

    AppState {
        db: init_db_pool(&database_config).await,
        server_config: ServerConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    }
}
