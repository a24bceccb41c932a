use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::modules::activities::controller::{
    get_activities, signup_for_activity, unregister_from_activity,
};
use crate::state::AppState;

pub fn init_activities_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_activities))
        .route("/{name}/signup", post(signup_for_activity))
        .route("/{name}/unregister", delete(unregister_from_activity))
}
