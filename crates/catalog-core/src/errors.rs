use std::sync::Arc;

use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

/// Realm advertised in the `WWW-Authenticate` challenge of a 401 response.
pub const BASIC_REALM: &str = r#"Basic realm="course-catalog""#;

const INTERNAL_MESSAGE: &str = "Internal Server Error";
const UNAUTHORIZED_MESSAGE: &str = "Access Denied";

/// The kinds of failure a handler can report.
///
/// The kind alone decides the HTTP status of an error response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    UniqueConstraint,
    BadRequest,
    NotFound,
    Forbidden,
    Unauthorized,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::Validation | ErrorKind::UniqueConstraint | ErrorKind::BadRequest => {
                StatusCode::BAD_REQUEST
            }
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// The `message` field of an error body: one string, or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: ErrorMessage,
}

/// Error context attached to the extensions of an error response.
///
/// Never serialized. The global error-logging stage reads it to report the
/// full error chain process-side.
#[derive(Debug, Clone)]
pub struct ErrorDetail {
    pub kind: ErrorKind,
    pub error: Arc<Error>,
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub messages: Vec<String>,
    pub error: Error,
}

impl AppError {
    fn with_messages(kind: ErrorKind, messages: Vec<String>) -> Self {
        let error = anyhow!("{}", messages.join("; "));
        Self {
            kind,
            messages,
            error,
        }
    }

    fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::with_messages(kind, vec![message.into()])
    }

    /// Field validation failed; `messages` keeps field declaration order.
    pub fn validation(messages: Vec<String>) -> Self {
        Self::with_messages(ErrorKind::Validation, messages)
    }

    pub fn unique_constraint(message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::UniqueConstraint, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::BadRequest, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::NotFound, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::with_message(ErrorKind::Forbidden, message)
    }

    /// Authentication failed. Callers never say why.
    pub fn unauthorized() -> Self {
        Self::with_message(ErrorKind::Unauthorized, UNAUTHORIZED_MESSAGE)
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind: ErrorKind::Internal,
            messages: vec![INTERNAL_MESSAGE.to_string()],
            error: err.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }

    /// The body a client sees for this error.
    pub fn body(&self) -> ErrorBody {
        let message = match self.kind {
            ErrorKind::Validation | ErrorKind::UniqueConstraint => {
                ErrorMessage::Many(self.messages.clone())
            }
            ErrorKind::Internal => ErrorMessage::One(INTERNAL_MESSAGE.to_string()),
            _ => ErrorMessage::One(self.messages.join("; ")),
        };

        ErrorBody { message }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut response = (status, Json(self.body())).into_response();

        if self.kind == ErrorKind::Unauthorized {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(BASIC_REALM),
            );
        }

        response.extensions_mut().insert(ErrorDetail {
            kind: self.kind,
            error: Arc::new(self.error),
        });

        response
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
