//! Database configuration and connection pool initialization.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default 5)
//!
//! The pool is opened once at startup, shared through
//! [`AppState`](crate::state::AppState), and closed during graceful
//! shutdown.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::env;

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// # Panics
    ///
    /// Panics if `DATABASE_URL` is not set.
    pub fn from_env() -> Self {
        let url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(5);

        Self {
            url,
            max_connections,
        }
    }
}

/// Opens the connection pool described by `config`.
///
/// # Panics
///
/// Panics if the database connection cannot be established.
pub async fn init_db_pool(config: &DatabaseConfig) -> PgPool {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .expect("Failed to connect to database")
}
