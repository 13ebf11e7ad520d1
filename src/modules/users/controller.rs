use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
};
use tracing::{info, instrument};

use catalog_core::{AppError, ErrorBody};

use crate::middleware::auth::AuthUser;
use crate::modules::users::model::{CreateUserDto, User};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created; Location header points at the site root"),
        (status = 400, description = "Validation failed or email already in use", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Users"
)]
#[instrument(skip(state, new_user))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(new_user): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, [(header::HeaderName, &'static str); 1]), AppError> {
    let user = UserService::create_user(&state.db, new_user).await?;
    info!(user_id = %user.id, "User created");

    Ok((StatusCode::CREATED, [(header::LOCATION, "/")]))
}

/// Get the authenticated user's own record
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "The authenticated user", body = User),
        (status = 401, description = "Missing or invalid credentials", body = ErrorBody)
    ),
    security(
        ("basic_auth" = [])
    ),
    tag = "Users"
)]
#[instrument]
pub async fn get_current_user(auth_user: AuthUser) -> Json<User> {
    Json(auth_user.into_user())
}
