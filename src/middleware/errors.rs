use std::any::Any;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::error;

use catalog_core::{AppError, ErrorDetail};

use crate::state::AppState;

/// Global error stage.
///
/// Runs after every handler. Responses produced from an [`AppError`] carry an
/// [`ErrorDetail`]; when `ENABLE_GLOBAL_ERROR_LOGGING` is on, its full error
/// chain is logged here. The response itself is passed through untouched.
pub async fn error_logging_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    if state.server_config.enable_global_error_logging
        && let Some(detail) = response.extensions().get::<ErrorDetail>()
    {
        error!(
            method = %method,
            path = %path,
            status = %response.status().as_u16(),
            kind = ?detail.kind,
            error = ?detail.error,
            "Global error handler"
        );
    }

    response
}

/// Turns a handler panic into the generic 500 response.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let reason = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::internal(anyhow::anyhow!("handler panicked: {}", reason)).into_response()
}
