use anyhow::Context;
use dotenvy::dotenv;
use tokio::signal;
use tracing::info;

use catalog_config::{CorsConfig, DatabaseConfig, LoggingConfig, ServerConfig};
use catalog_db::{init_db_pool, verify_connectivity};
use catalog_observability::init_logging;
use course_catalog::router::init_router;
use course_catalog::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _log_guard = init_logging(&LoggingConfig::from_env());

    let server_config = ServerConfig::from_env().context("Invalid server configuration")?;
    let database_config = DatabaseConfig::from_env().context("Invalid database configuration")?;

    let db = init_db_pool(&database_config)?;
    verify_connectivity(&db, database_config.startup_policy).await?;

    let state = AppState::new(db, server_config.clone(), CorsConfig::from_env());
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(server_config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", server_config.bind_address()))?;
    info!(
        address = %listener.local_addr()?,
        error_logging = server_config.enable_global_error_logging,
        "Server is listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, starting graceful shutdown"),
        _ = terminate => info!("Received SIGTERM, starting graceful shutdown"),
    }
}
