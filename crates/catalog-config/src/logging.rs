use std::env;

/// Console and file logging settings.
///
/// - `LOG_LEVEL`: default level for the application's own targets (default `info`);
///   `RUST_LOG` overrides the whole filter when set
/// - `LOG_DIR`: when set, structured JSON logs are also written to a daily
///   rolling file in this directory
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_dir: lookup("LOG_DIR").filter(|dir| !dir.trim().is_empty()),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
