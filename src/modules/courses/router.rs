use axum::{Router, routing::get};

use crate::modules::courses::controller::{
    create_course, delete_course, get_course_by_id, get_courses, update_course,
};
use crate::router::route_not_found;
use crate::state::AppState;

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_courses).post(create_course))
        .route(
            "/{id}",
            get(get_course_by_id).put(update_course).delete(delete_course),
        )
        .method_not_allowed_fallback(route_not_found)
}
