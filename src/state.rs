use sqlx::PgPool;

use catalog_config::{CorsConfig, ServerConfig};

/// Application context built once at startup and handed to the router.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub server_config: ServerConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(db: PgPool, server_config: ServerConfig, cors_config: CorsConfig) -> Self {
        Self {
            db,
            server_config,
            cors_config,
        }
    }
}
