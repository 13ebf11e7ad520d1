use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
};
use tracing::{info, instrument};
use uuid::Uuid;

use catalog_core::{AppError, ErrorBody, FieldValidation};

use crate::middleware::auth::AuthUser;
use crate::modules::courses::model::{CourseDto, CourseWithOwner};
use crate::modules::courses::service::{CourseService, ensure_owner, parse_course_id};
use crate::state::AppState;
use crate::validator::{JsonBody, ValidatedJson};

#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "All courses with their owners", body = Vec<CourseWithOwner>)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseWithOwner>>, AppError> {
    let courses = CourseService::list_courses(&state.db).await?;
    Ok(Json(courses))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course details with owner", body = CourseWithOwner),
        (status = 404, description = "Course not found", body = ErrorBody)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_course_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CourseWithOwner>, AppError> {
    let course_id = parse_course_id(&id)?;
    let course = CourseService::get_course(&state.db, course_id).await?;
    Ok(Json(course))
}

#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CourseDto,
    responses(
        (status = 201, description = "Course created; Location header points at the new course"),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 401, description = "Missing or invalid credentials", body = ErrorBody)
    ),
    tag = "Courses",
    security(("basic_auth" = []))
)]
#[instrument(skip(state, fields))]
pub async fn create_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(fields): ValidatedJson<CourseDto>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1]), AppError> {
    let course_id = CourseService::create_course(&state.db, auth_user.id(), fields).await?;
    info!(course_id = %course_id, owner_id = %auth_user.id(), "Course created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/courses/{}", course_id))],
    ))
}

#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body = CourseDto,
    responses(
        (status = 204, description = "Course updated"),
        (status = 400, description = "Validation failed", body = ErrorBody),
        (status = 401, description = "Missing or invalid credentials", body = ErrorBody),
        (status = 403, description = "Authenticated user does not own the course", body = ErrorBody),
        (status = 404, description = "Course not found", body = ErrorBody)
    ),
    tag = "Courses",
    security(("basic_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    JsonBody(dto): JsonBody<CourseDto>,
) -> Result<StatusCode, AppError> {
    let course_id = parse_course_id(&id)?;
    let course = CourseService::find_course(&state.db, course_id).await?;
    ensure_owner(&course, &auth_user)?;

    let fields = dto.validate_fields().map_err(AppError::validation)?;
    CourseService::update_course(&state.db, course.id, auth_user.id(), fields).await?;
    info!(course_id = %course.id, "Course updated");

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 401, description = "Missing or invalid credentials", body = ErrorBody),
        (status = 403, description = "Authenticated user does not own the course", body = ErrorBody),
        (status = 404, description = "Course not found", body = ErrorBody)
    ),
    tag = "Courses",
    security(("basic_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let course_id = parse_course_id(&id)?;
    let course = CourseService::find_course(&state.db, course_id).await?;
    ensure_owner(&course, &auth_user)?;

    CourseService::delete_course(&state.db, course.id, auth_user.id()).await?;
    info!(course_id = %course.id, "Course deleted");

    Ok(StatusCode::NO_CONTENT)
}
