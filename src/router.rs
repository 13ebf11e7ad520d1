use axum::http::{HeaderValue, Method, header};
use axum::{Json, Router, middleware, routing::get};
use serde_json::{Value, json};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use catalog_core::AppError;

use crate::docs::ApiDoc;
use crate::logging::trace_layer;
use crate::middleware::errors::{error_logging_middleware, handle_panic};
use crate::modules::courses::router::init_courses_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

pub const ROUTE_NOT_FOUND: &str = "Route Not Found";

async fn welcome() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the REST API Course database project!",
    }))
}

/// Runs when no route matched, or the path matched but the method did not.
pub async fn route_not_found() -> AppError {
    AppError::not_found(ROUTE_NOT_FOUND)
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::LOCATION])
        .allow_credentials(true)
}

/// Every route the service exposes, without state or layers.
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/", get(welcome))
        .nest(
            "/api",
            Router::new()
                .nest("/users", init_users_router())
                .nest("/courses", init_courses_router())
                .method_not_allowed_fallback(route_not_found),
        )
}

/// Adds the fallbacks, state and middleware stack to `routes`.
///
/// Layers, innermost first: panic recovery, global error logging, CORS,
/// request tracing.
pub fn build_app(routes: Router<AppState>, state: AppState) -> Router {
    routes
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .with_state(state.clone())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            error_logging_middleware,
        ))
        .layer(cors_layer(&state))
        .layer(trace_layer())
}

pub fn init_router(state: AppState) -> Router {
    build_app(app_routes(), state)
}
