use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use catalog_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::modules::courses::model::{Course, CourseFields, CourseWithOwner, CourseWithOwnerRow};

pub const COURSE_NOT_FOUND: &str = "Course not found";
pub const NOT_COURSE_OWNER: &str = "You do not own this course";

const SELECT_WITH_OWNER: &str = r#"SELECT
        c.id,
        c.user_id,
        c.title,
        c.description,
        c.estimated_time,
        c.materials_needed,
        u.first_name AS owner_first_name,
        u.last_name AS owner_last_name,
        u.email_address AS owner_email_address
       FROM courses c
       JOIN users u ON u.id = c.user_id"#;

/// Parses a course id taken from the path. A malformed id names no course.
pub fn parse_course_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found(COURSE_NOT_FOUND))
}

/// Only the owner of a course may change it.
pub fn ensure_owner(course: &Course, auth_user: &AuthUser) -> Result<(), AppError> {
    if course.user_id != auth_user.id() {
        return Err(AppError::forbidden(NOT_COURSE_OWNER));
    }
    Ok(())
}

fn map_write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_foreign_key_violation()
    {
        return AppError::validation(vec![
            "Course owner must reference an existing user".to_string(),
        ]);
    }
    AppError::from(e)
}

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db))]
    pub async fn list_courses(db: &PgPool) -> Result<Vec<CourseWithOwner>, AppError> {
        let query = format!("{} ORDER BY c.created_at, c.id", SELECT_WITH_OWNER);
        let rows = sqlx::query_as::<_, CourseWithOwnerRow>(&query)
            .fetch_all(db)
            .await?;

        Ok(rows.into_iter().map(CourseWithOwner::from).collect())
    }

    #[instrument(skip(db))]
    pub async fn get_course(db: &PgPool, course_id: Uuid) -> Result<CourseWithOwner, AppError> {
        let query = format!("{} WHERE c.id = $1", SELECT_WITH_OWNER);
        let row = sqlx::query_as::<_, CourseWithOwnerRow>(&query)
            .bind(course_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(COURSE_NOT_FOUND))?;

        Ok(row.into())
    }

    /// Loads the bare course row, for ownership checks.
    #[instrument(skip(db))]
    pub async fn find_course(db: &PgPool, course_id: Uuid) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(
            r#"SELECT id, user_id, title, description, estimated_time, materials_needed
               FROM courses
               WHERE id = $1"#,
        )
        .bind(course_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(COURSE_NOT_FOUND))?;

        Ok(course)
    }

    #[instrument(skip(db))]
    pub async fn create_course(
        db: &PgPool,
        owner_id: Uuid,
        fields: CourseFields,
    ) -> Result<Uuid, AppError> {
        let course_id = sqlx::query_scalar::<_, Uuid>(
            r#"INSERT INTO courses (user_id, title, description, estimated_time, materials_needed)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id"#,
        )
        .bind(owner_id)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(&fields.estimated_time)
        .bind(&fields.materials_needed)
        .fetch_one(db)
        .await
        .map_err(map_write_error)?;

        Ok(course_id)
    }

    /// Updates a course owned by `owner_id`.
    ///
    /// Optional fields left `None` keep their stored value. A course deleted
    /// between the ownership check and this write is reported as not found.
    #[instrument(skip(db))]
    pub async fn update_course(
        db: &PgPool,
        course_id: Uuid,
        owner_id: Uuid,
        fields: CourseFields,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"UPDATE courses
               SET title = $3,
                   description = $4,
                   estimated_time = COALESCE($5, estimated_time),
                   materials_needed = COALESCE($6, materials_needed),
                   updated_at = NOW()
               WHERE id = $1 AND user_id = $2"#,
        )
        .bind(course_id)
        .bind(owner_id)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(&fields.estimated_time)
        .bind(&fields.materials_needed)
        .execute(db)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(COURSE_NOT_FOUND));
        }

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn delete_course(db: &PgPool, course_id: Uuid, owner_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1 AND user_id = $2")
            .bind(course_id)
            .bind(owner_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(COURSE_NOT_FOUND));
        }

        Ok(())
    }
}
