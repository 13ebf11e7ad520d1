//! Course data models and DTOs.
//!
//! A course belongs to exactly one user through `user_id`. Reads join the
//! owner explicitly and return it embedded as `user`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use catalog_core::{FieldRule, FieldValidation, collect_violations};

use crate::modules::users::model::User;

pub const TITLE: FieldRule = FieldRule::required("Title");
pub const DESCRIPTION: FieldRule = FieldRule::required("Description");

/// A course row without its owner.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Course {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

/// A course joined with its owner's public columns.
#[derive(Debug, FromRow)]
pub struct CourseWithOwnerRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub owner_first_name: String,
    pub owner_last_name: String,
    pub owner_email_address: String,
}

/// A course as returned by the API, owner embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseWithOwner {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: Uuid,
    pub user: User,
}

impl From<CourseWithOwnerRow> for CourseWithOwner {
    fn from(row: CourseWithOwnerRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            estimated_time: row.estimated_time,
            materials_needed: row.materials_needed,
            user_id: row.user_id,
            user: User {
                id: row.user_id,
                first_name: row.owner_first_name,
                last_name: row.owner_last_name,
                email_address: row.owner_email_address,
            },
        }
    }
}

/// Request body for creating or updating a course.
///
/// Any `userId` in the body is ignored: the owner is always the
/// authenticated user and never changes.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

/// Course fields that passed validation.
///
/// On update, `None` optional fields keep their stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseFields {
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

impl FieldValidation for CourseDto {
    type Validated = CourseFields;

    fn validate_fields(self) -> Result<CourseFields, Vec<String>> {
        let violations = collect_violations([
            (&TITLE, self.title.as_deref()),
            (&DESCRIPTION, self.description.as_deref()),
        ]);
        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(CourseFields {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            estimated_time: self.estimated_time,
            materials_needed: self.materials_needed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_title_and_description() {
        let violations = CourseDto::default().validate_fields().unwrap_err();
        assert_eq!(
            violations,
            vec![
                r#"Please provide a value for "Title""#,
                r#"Please provide a value for "Description""#,
            ]
        );
    }

    #[test]
    fn test_empty_description_only() {
        let dto = CourseDto {
            title: Some("Build a Basic Bookcase".into()),
            description: Some("".into()),
            ..Default::default()
        };
        assert_eq!(
            dto.validate_fields().unwrap_err(),
            vec![r#""Description" is required"#]
        );
    }

    #[test]
    fn test_optional_fields_pass_through() {
        let dto = CourseDto {
            title: Some("Learn How to Program".into()),
            description: Some("In this course, you'll learn how to write code.".into()),
            estimated_time: Some("6 hours".into()),
            materials_needed: None,
        };
        let fields = dto.validate_fields().unwrap();
        assert_eq!(fields.estimated_time.as_deref(), Some("6 hours"));
        assert_eq!(fields.materials_needed, None);
    }

    #[test]
    fn test_owner_is_embedded() {
        let owner_id = Uuid::new_v4();
        let course = CourseWithOwner::from(CourseWithOwnerRow {
            id: Uuid::new_v4(),
            user_id: owner_id,
            title: "Build a Basic Bookcase".into(),
            description: "High-end furniture projects are great to dream about.".into(),
            estimated_time: Some("12 hours".into()),
            materials_needed: Some("* 1/2 x 3/4 inch parting strip".into()),
            owner_first_name: "Joe".into(),
            owner_last_name: "Smith".into(),
            owner_email_address: "joe@smith.com".into(),
        });

        let value = serde_json::to_value(&course).unwrap();
        assert_eq!(value["userId"], owner_id.to_string());
        assert_eq!(value["user"]["id"], owner_id.to_string());
        assert_eq!(value["user"]["firstName"], "Joe");
        assert_eq!(value["estimatedTime"], "12 hours");
        assert!(value["user"].get("password").is_none());
    }
}
