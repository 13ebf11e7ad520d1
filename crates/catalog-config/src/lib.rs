//! # Catalog Config
//!
//! Configuration types for the Course Catalog API, loaded from environment
//! variables (a `.env` file is honoured by the binary through `dotenvy`).
//!
//! - [`server`]: listen port and global error logging
//! - [`database`]: connection string, pool size and startup policy
//! - [`cors`]: allowed browser origins
//! - [`logging`]: log level and optional JSON log directory
//!
//! Every config exposes `from_env()` and a `from_lookup()` variant that takes
//! a key lookup function, so parsing can be exercised without touching the
//! process environment.
//!
//! # Example
//!
//! ```ignore
//! use catalog_config::{CorsConfig, DatabaseConfig, ServerConfig};
//!
//! let server = ServerConfig::from_env()?;
//! let database = DatabaseConfig::from_env()?;
//! let cors = CorsConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod logging;
pub mod server;

pub use cors::CorsConfig;
pub use database::{DatabaseConfig, StartupPolicy};
pub use logging::LoggingConfig;
pub use server::ServerConfig;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}
