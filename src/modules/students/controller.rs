use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use crate::modules::activities::controller::ErrorResponse;
use crate::modules::students::model::{StudentProfile, UpsertStudentParams, UpsertStudentResponse};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedQuery;

#[utoipa::path(
    get,
    path = "/students/{email}",
    params(
        ("email" = String, Path, description = "Student email")
    ),
    responses(
        (status = 200, description = "Profile with confirmed enrollments", body = StudentProfile),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_student_profile(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<StudentProfile>, AppError> {
    let profile = StudentService::get_profile(&state.db, &email).await?;
    Ok(Json(profile))
}

#[utoipa::path(
    post,
    path = "/students",
    params(UpsertStudentParams),
    responses(
        (status = 200, description = "Profile created or overwritten", body = UpsertStudentResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state, params), fields(email = %params.email))]
pub async fn upsert_student(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<UpsertStudentParams>,
) -> Result<Json<UpsertStudentResponse>, AppError> {
    let profile = StudentService::upsert_profile(&state.db, &params).await?;

    Ok(Json(UpsertStudentResponse {
        message: "Student profile saved".to_string(),
        profile,
    }))
}
