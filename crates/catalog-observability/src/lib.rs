//! # Catalog Observability
//!
//! Logging setup for the Course Catalog API.
//!
//! - **Console**: compact, human-readable output filtered by `RUST_LOG`, or by
//!   `LOG_LEVEL` for the application's own targets when `RUST_LOG` is unset
//! - **JSON file**: optional daily rolling file of structured logs, enabled by
//!   `LOG_DIR`; suitable for ingestion by a log shipper

use catalog_config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const APP_TARGETS: &[&str] = &["course_catalog", "catalog_core", "catalog_db"];

/// Filter directive string used when `RUST_LOG` is not set.
pub fn default_directives(log_level: &str) -> String {
    let mut directives: Vec<String> = APP_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, log_level))
        .collect();
    // axum logs extractor rejections with the `axum::rejection` target at TRACE level
    directives.push("tower_http=warn,hyper=warn,sqlx=warn,axum::rejection=trace".to_string());
    directives.join(",")
}

/// Installs the global tracing subscriber.
///
/// The returned guard flushes the JSON file writer on drop and must be held
/// for the life of the process.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)));

    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let (json_layer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "course-catalog.json");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_current_span(true)
                .with_span_list(true)
                .with_filter(EnvFilter::new(default_directives(&config.log_level)));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(json_layer)
        .init();

    guard
}
