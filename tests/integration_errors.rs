mod common;

use std::io;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use catalog_config::ServerConfig;
use common::{body_bytes, body_json, empty_request, send, test_state, unreachable_pool};
use course_catalog::router::{app_routes, build_app};
use serde_json::json;
use tracing::subscriber::DefaultGuard;

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn install(&self) -> DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

async fn exploding_handler() -> &'static str {
    panic!("exploding handler");
}

fn app_with_error_logging(enabled: bool) -> Router {
    let server_config = ServerConfig {
        enable_global_error_logging: enabled,
        ..ServerConfig::default()
    };
    let routes = app_routes().route("/explode", get(exploding_handler));
    build_app(routes, test_state(unreachable_pool(), server_config))
}

#[tokio::test]
async fn test_error_chain_is_logged_when_enabled() {
    let logs = CapturedLogs::default();
    let _guard = logs.install();
    let app = app_with_error_logging(true);

    let response = send(&app, empty_request("GET", "/api/courses/not-a-course")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "message": "Course not found" }));

    let output = logs.contents();
    assert!(output.contains("Global error handler"), "{}", output);
    assert!(output.contains("kind=NotFound"), "{}", output);
    assert!(output.contains("Course not found"), "{}", output);
}

#[tokio::test]
async fn test_error_logging_is_silent_when_disabled() {
    let logs = CapturedLogs::default();
    let _guard = logs.install();
    let app = app_with_error_logging(false);

    let response = send(&app, empty_request("GET", "/api/courses/not-a-course")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "message": "Course not found" }));
    assert!(!logs.contents().contains("Global error handler"));
}

#[tokio::test]
async fn test_error_body_is_the_same_with_and_without_logging() {
    let enabled = send(
        &app_with_error_logging(true),
        empty_request("GET", "/nonexistent"),
    )
    .await;
    let disabled = send(
        &app_with_error_logging(false),
        empty_request("GET", "/nonexistent"),
    )
    .await;

    assert_eq!(enabled.status(), disabled.status());
    assert_eq!(body_bytes(enabled).await, body_bytes(disabled).await);
}

#[tokio::test]
async fn test_panicking_handler_becomes_internal_error() {
    let logs = CapturedLogs::default();
    let _guard = logs.install();
    let app = app_with_error_logging(true);

    let response = send(&app, empty_request("GET", "/explode")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "message": "Internal Server Error" })
    );

    let output = logs.contents();
    assert!(output.contains("Global error handler"), "{}", output);
    assert!(output.contains("handler panicked: exploding handler"), "{}", output);
}

#[tokio::test]
async fn test_panic_details_never_reach_the_client() {
    let app = app_with_error_logging(false);

    let response = send(&app, empty_request("GET", "/explode")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_bytes(response).await;
    assert!(!String::from_utf8_lossy(&body).contains("exploding"));
}
