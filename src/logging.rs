//! Per-request tracing hooks for `tower_http::trace::TraceLayer`.
//!
//! Every request runs inside a `request` span carrying a fresh request id,
//! and ends with one completion line: method, path, status and latency, at
//! `info`, `warn` (4xx) or `error` (5xx).

use std::time::Duration;

use axum::http::{Request, Response};
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{MakeSpan, OnResponse, TraceLayer};
use tracing::{Span, error, info, info_span, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        info_span!(
            "request",
            request_id = %Uuid::new_v4(),
            method = %request.method(),
            path = %request.uri().path(),
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogCompletion;

impl<B> OnResponse<B> for LogCompletion {
    fn on_response(self, response: &Response<B>, latency: Duration, _span: &Span) {
        let status = response.status().as_u16();
        let latency_ms = latency.as_millis() as u64;

        match status {
            500..=599 => error!(status, latency_ms, "Request failed"),
            400..=499 => warn!(status, latency_ms, "Request rejected"),
            _ => info!(status, latency_ms, "Request completed"),
        }
    }
}

/// Request tracing for the whole router. Failures are reported by the
/// completion line, so the layer's own failure hook is disabled.
pub type HttpTraceLayer =
    TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RequestSpan, (), LogCompletion, (), (), ()>;

pub fn trace_layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(RequestSpan)
        .on_request(())
        .on_response(LogCompletion)
        .on_body_chunk(())
        .on_eos(())
        .on_failure(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn completion_line(status: u16) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let request = Request::builder()
                .method("DELETE")
                .uri("/api/courses/42")
                .body(())
                .unwrap();
            let span = RequestSpan.make_span(&request);
            let _entered = span.enter();

            let response = Response::builder().status(status).body(()).unwrap();
            LogCompletion.on_response(&response, Duration::from_millis(7), &span);
        });

        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_completion_line_carries_request_fields() {
        let line = completion_line(204);

        assert!(line.contains("INFO"));
        assert!(line.contains("Request completed"));
        assert!(line.contains("method=DELETE"));
        assert!(line.contains("path=/api/courses/42"));
        assert!(line.contains("status=204"));
        assert!(line.contains("latency_ms=7"));
        assert!(line.contains("request_id="));
    }

    #[test]
    fn test_level_follows_status_class() {
        let line = completion_line(403);
        assert!(line.contains("WARN"));
        assert!(line.contains("Request rejected"));

        let line = completion_line(500);
        assert!(line.contains("ERROR"));
        assert!(line.contains("Request failed"));
    }
}
