use axum::{Router, routing::get};

use crate::modules::users::controller::{create_user, get_current_user};
use crate::router::route_not_found;
use crate::state::AppState;

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_current_user).post(create_user))
        .method_not_allowed_fallback(route_not_found)
}
