use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::students::controller::{get_student_profile, upsert_student};
use crate::state::AppState;

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", post(upsert_student))
        .route("/{email}", get(get_student_profile))
}
