use axum::{
    Router,
    routing::{delete, get},
};

use crate::modules::waitlist::controller::{get_activity_waitlist, remove_from_waitlist};
use crate::state::AppState;

/// Nested under `/activities/{name}/waitlist` by the main router.
pub fn init_waitlist_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_activity_waitlist))
        .route("/remove", delete(remove_from_waitlist))
}
