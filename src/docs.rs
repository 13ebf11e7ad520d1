use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use catalog_core::{ErrorBody, ErrorMessage};

use crate::modules::courses::model::{CourseDto, CourseWithOwner};
use crate::modules::users::model::{CreateUserDto, User};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_current_user,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course_by_id,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
    ),
    components(
        schemas(
            User,
            CreateUserDto,
            CourseDto,
            CourseWithOwner,
            ErrorBody,
            ErrorMessage,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Signup and the authenticated user's profile"),
        (name = "Courses", description = "Public course catalog and owner-only course management")
    ),
    info(
        title = "Course Catalog API",
        version = "0.1.0",
        description = "A REST API for users and the courses they own, built with Rust, Axum, and PostgreSQL. Protected routes use HTTP Basic authentication with the user's email address as the username.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            )
        }
    }
}
