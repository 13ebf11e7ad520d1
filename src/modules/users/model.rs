//! User data models and DTOs.
//!
//! - [`User`]: the public view of a user; never carries the password
//! - [`UserCredentials`]: a user row including the password hash, used only
//!   by authentication
//! - [`CreateUserDto`]: signup request body, validated into [`NewUser`]

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use catalog_core::{FieldRule, FieldValidation, collect_violations};

pub const FIRST_NAME: FieldRule = FieldRule::required("First Name");
pub const LAST_NAME: FieldRule = FieldRule::required("Last Name");
pub const EMAIL_ADDRESS: FieldRule = FieldRule::email("Email Address");
pub const PASSWORD: FieldRule = FieldRule::required("Password");

/// A user as returned by the API.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

#[derive(FromRow)]
pub struct UserCredentials {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password: String,
}

impl From<UserCredentials> for User {
    fn from(credentials: UserCredentials) -> Self {
        Self {
            id: credentials.id,
            first_name: credentials.first_name,
            last_name: credentials.last_name,
            email_address: credentials.email_address,
        }
    }
}

/// Signup request body.
///
/// Every field is optional at the parsing stage so that a missing field is
/// reported as a validation message rather than a parse failure.
#[derive(Deserialize, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub password: Option<String>,
}

/// A signup request that passed validation.
#[derive(Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password: String,
}

impl FieldValidation for CreateUserDto {
    type Validated = NewUser;

    fn validate_fields(self) -> Result<NewUser, Vec<String>> {
        let violations = collect_violations([
            (&FIRST_NAME, self.first_name.as_deref()),
            (&LAST_NAME, self.last_name.as_deref()),
            (&EMAIL_ADDRESS, self.email_address.as_deref()),
            (&PASSWORD, self.password.as_deref()),
        ]);
        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(NewUser {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email_address: self.email_address.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_dto() -> CreateUserDto {
        CreateUserDto {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            email_address: Some("ada@example.com".into()),
            password: Some("analytical".into()),
        }
    }

    #[test]
    fn test_complete_dto_validates() {
        let new_user = complete_dto().validate_fields().unwrap();
        assert_eq!(new_user.first_name, "Ada");
        assert_eq!(new_user.email_address, "ada@example.com");
    }

    #[test]
    fn test_empty_dto_reports_every_field_in_order() {
        let violations = CreateUserDto::default().validate_fields().err().unwrap();
        assert_eq!(
            violations,
            vec![
                r#"Please provide a value for "First Name""#,
                r#"Please provide a value for "Last Name""#,
                r#"Please provide a value for "Email Address""#,
                r#"Please provide a value for "Password""#,
            ]
        );
    }

    #[test]
    fn test_mixed_failures() {
        let dto = CreateUserDto {
            last_name: Some("".into()),
            email_address: Some("ada-at-example".into()),
            ..complete_dto()
        };
        let violations = dto.validate_fields().err().unwrap();
        assert_eq!(
            violations,
            vec![
                r#""Last Name" is required"#,
                "Please provide a valid email address",
            ]
        );
    }

    #[test]
    fn test_user_serializes_camel_case_without_password() {
        let user = User {
            id: Uuid::nil(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email_address: "ada@example.com".into(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["firstName"], "Ada");
        assert_eq!(value["emailAddress"], "ada@example.com");
        assert!(value.get("password").is_none());
    }
}
