use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::modules::activities::model::{
    ActivityDetail, DashboardResponse, MessageResponse, SignupOutcome, SignupParams,
    UnregisterParams,
};
use crate::modules::activities::service::EnrollmentService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedQuery;

/// Error body shape, for API documentation.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/activities",
    responses(
        (status = 200, description = "Mapping of activity name to details and roster"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Activities"
)]
#[instrument(skip(state))]
pub async fn get_activities(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, ActivityDetail>>, AppError> {
    let activities = EnrollmentService::list_activities(&state.db).await?;
    Ok(Json(activities))
}

#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Aggregate enrollment statistics", body = DashboardResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Activities"
)]
#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let dashboard = EnrollmentService::dashboard(&state.db).await?;
    Ok(Json(dashboard))
}

#[utoipa::path(
    post,
    path = "/activities/{name}/signup",
    params(
        ("name" = String, Path, description = "Activity name"),
        SignupParams
    ),
    responses(
        (status = 200, description = "Enrolled or waitlisted", body = MessageResponse),
        (status = 400, description = "Missing profile fields or duplicate signup", body = ErrorResponse),
        (status = 404, description = "Activity not found", body = ErrorResponse)
    ),
    tag = "Activities"
)]
#[instrument(skip(state, params), fields(email = %params.email))]
pub async fn signup_for_activity(
    State(state): State<AppState>,
    Path(name): Path<String>,
    ValidatedQuery(params): ValidatedQuery<SignupParams>,
) -> Result<Json<MessageResponse>, AppError> {
    let outcome = EnrollmentService::signup(&state.db, &name, &params).await?;

    let message = match outcome {
        SignupOutcome::Enrolled => format!("Signed up {} for {}", params.email, name),
        SignupOutcome::Waitlisted => format!(
            "Activity full. {} added to waitlist for {}",
            params.email, name
        ),
    };

    Ok(Json(MessageResponse { message }))
}

#[utoipa::path(
    delete,
    path = "/activities/{name}/unregister",
    params(
        ("name" = String, Path, description = "Activity name"),
        UnregisterParams
    ),
    responses(
        (status = 200, description = "Unregistered; earliest waitlisted student promoted if any", body = MessageResponse),
        (status = 400, description = "Student is not signed up for this activity", body = ErrorResponse),
        (status = 404, description = "Activity or student not found", body = ErrorResponse)
    ),
    tag = "Activities"
)]
#[instrument(skip(state, params), fields(email = %params.email))]
pub async fn unregister_from_activity(
    State(state): State<AppState>,
    Path(name): Path<String>,
    ValidatedQuery(params): ValidatedQuery<UnregisterParams>,
) -> Result<Json<MessageResponse>, AppError> {
    EnrollmentService::unregister(&state.db, &name, &params.email).await?;

    Ok(Json(MessageResponse {
        message: format!("Unregistered {} from {}", params.email, name),
    }))
}
