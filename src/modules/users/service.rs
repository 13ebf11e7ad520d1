use sqlx::PgPool;
use tracing::instrument;

use catalog_core::{AppError, hash_password};

use crate::modules::users::model::{NewUser, User, UserCredentials};

pub const DUPLICATE_EMAIL_MESSAGE: &str = "The email address you entered is already in use";

pub struct UserService;

impl UserService {
    /// Hashes the password and inserts the user.
    ///
    /// The unique index on `email_address` decides concurrent signups with the
    /// same address; the loser gets a unique-constraint error.
    #[instrument(skip(db, new_user), fields(email = %new_user.email_address))]
    pub async fn create_user(db: &PgPool, new_user: NewUser) -> Result<User, AppError> {
        let hashed_password = hash_password(&new_user.password)?;

        let user = sqlx::query_as::<_, User>(
            r#"INSERT INTO users (first_name, last_name, email_address, password)
               VALUES ($1, $2, $3, $4)
               RETURNING id, first_name, last_name, email_address"#,
        )
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.email_address)
        .bind(&hashed_password)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::unique_constraint(DUPLICATE_EMAIL_MESSAGE);
            }
            AppError::from(e)
        })?;

        Ok(user)
    }

    /// Exact, case-sensitive lookup used by Basic authentication.
    #[instrument(skip(db))]
    pub async fn find_credentials_by_email(
        db: &PgPool,
        email_address: &str,
    ) -> Result<Option<UserCredentials>, AppError> {
        let credentials = sqlx::query_as::<_, UserCredentials>(
            r#"SELECT id, first_name, last_name, email_address, password
               FROM users
               WHERE email_address = $1"#,
        )
        .bind(email_address)
        .fetch_optional(db)
        .await?;

        Ok(credentials)
    }
}
