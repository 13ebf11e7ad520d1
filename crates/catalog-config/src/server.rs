use std::env;

use crate::ConfigError;

pub const DEFAULT_PORT: u16 = 5000;
const DEFAULT_HOST: &str = "0.0.0.0";

/// HTTP listener settings.
///
/// - `HOST`: interface to bind (default `0.0.0.0`)
/// - `PORT`: listen port (default `5000`)
/// - `ENABLE_GLOBAL_ERROR_LOGGING`: `true` logs the full chain of every error
///   response process-side; any other value leaves it off
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_global_error_logging: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT").filter(|value| !value.trim().is_empty()) {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            enable_global_error_logging: lookup("ENABLE_GLOBAL_ERROR_LOGGING").as_deref()
                == Some("true"),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            enable_global_error_logging: false,
        }
    }
}
