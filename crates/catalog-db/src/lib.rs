//! # Catalog DB
//!
//! PostgreSQL pool construction and the one-shot startup connectivity check.
//!
//! The pool is built lazily: no connection is opened until the first query,
//! so building it never fails on an unreachable database. Whether an
//! unreachable database at startup is fatal is decided by
//! [`StartupPolicy`](catalog_config::StartupPolicy).
//!
//! # Example
//!
//! ```ignore
//! use catalog_config::DatabaseConfig;
//! use catalog_db::{init_db_pool, verify_connectivity};
//!
//! let config = DatabaseConfig::from_env()?;
//! let pool = init_db_pool(&config)?;
//! verify_connectivity(&pool, config.startup_policy).await?;
//! ```

use std::time::Duration;

use catalog_config::{DatabaseConfig, StartupPolicy};
use sqlx::postgres::PgPoolOptions;
use tracing::{error, info, warn};

pub use sqlx::PgPool;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("invalid database connection string: {0}")]
    InvalidUrl(#[source] sqlx::Error),
    #[error("unable to connect to the database: {0}")]
    Unreachable(#[source] sqlx::Error),
}

/// Builds a PostgreSQL pool from `config` without connecting.
///
/// Fails only when the connection string cannot be parsed.
pub fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, DbError> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_lazy(&config.url)
        .map_err(DbError::InvalidUrl)
}

/// Round-trips a trivial query through the pool.
pub async fn check_connection(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(DbError::Unreachable)
}

/// Verifies connectivity once and logs the outcome.
///
/// With [`StartupPolicy::Warn`] a failure is logged and swallowed; with
/// [`StartupPolicy::FailFast`] it is returned to the caller.
pub async fn verify_connectivity(pool: &PgPool, policy: StartupPolicy) -> Result<(), DbError> {
    match check_connection(pool).await {
        Ok(()) => {
            info!("Database connection has been established successfully");
            Ok(())
        }
        Err(e) if policy == StartupPolicy::Warn => {
            warn!(error = %e, policy = %policy, "Unable to connect to the database, continuing");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, policy = %policy, "Unable to connect to the database");
            Err(e)
        }
    }
}
