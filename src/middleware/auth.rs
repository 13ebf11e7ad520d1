use std::sync::LazyLock;

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use catalog_core::{AppError, hash_password, verify_password};

use crate::modules::users::model::User;
use crate::modules::users::service::UserService;
use crate::state::AppState;

/// Extractor that authenticates the request with HTTP Basic credentials.
///
/// The username is the user's email address. Every failure, whatever its
/// cause, rejects with the same 401 response.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.0.id
    }

    pub fn into_user(self) -> User {
        self.0
    }
}

/// Hash checked against when the email is unknown, so that an unknown user
/// costs the same bcrypt work as a wrong password.
static UNKNOWN_USER_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("course-catalog-unknown-user").ok());

/// Resolves an email/password pair to a user.
pub async fn authenticate(db: &PgPool, email: &str, password: &str) -> Result<AuthUser, AppError> {
    let Some(credentials) = UserService::find_credentials_by_email(db, email).await? else {
        if let Some(hash) = UNKNOWN_USER_HASH.as_deref() {
            let _ = verify_password(password, hash);
        }
        warn!(email = %email, "Authentication failed: unknown email address");
        return Err(AppError::unauthorized());
    };

    if !verify_password(password, &credentials.password)? {
        warn!(email = %email, "Authentication failed: password mismatch");
        return Err(AppError::unauthorized());
    }

    debug!(user_id = %credentials.id, "Authenticated");
    Ok(AuthUser(credentials.into()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(credentials)) =
            TypedHeader::<Authorization<Basic>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    warn!(reason = %rejection, "Authentication failed: no usable Basic credentials");
                    AppError::unauthorized()
                })?;

        authenticate(&state.db, credentials.username(), credentials.password()).await
    }
}
