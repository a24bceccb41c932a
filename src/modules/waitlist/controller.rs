use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use crate::modules::activities::controller::ErrorResponse;
use crate::modules::activities::model::MessageResponse;
use crate::modules::students::model::StudentSummary;
use crate::modules::waitlist::model::RemoveFromWaitlistParams;
use crate::modules::waitlist::service::WaitlistService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedQuery;

#[utoipa::path(
    get,
    path = "/activities/{name}/waitlist",
    params(
        ("name" = String, Path, description = "Activity name")
    ),
    responses(
        (status = 200, description = "Waitlist entries in FIFO order", body = [StudentSummary]),
        (status = 404, description = "Activity not found", body = ErrorResponse)
    ),
    tag = "Waitlist"
)]
#[instrument(skip(state))]
pub async fn get_activity_waitlist(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<StudentSummary>>, AppError> {
    let entries = WaitlistService::list_for_activity(&state.db, &name).await?;
    Ok(Json(entries))
}

#[utoipa::path(
    delete,
    path = "/activities/{name}/waitlist/remove",
    params(
        ("name" = String, Path, description = "Activity name"),
        RemoveFromWaitlistParams
    ),
    responses(
        (status = 200, description = "Entry removed; no promotion is triggered", body = MessageResponse),
        (status = 400, description = "Student is not on the waitlist", body = ErrorResponse),
        (status = 403, description = "Requester lacks a staff role", body = ErrorResponse),
        (status = 404, description = "Activity or student not found", body = ErrorResponse)
    ),
    tag = "Waitlist"
)]
#[instrument(skip(state, params), fields(email = %params.email))]
pub async fn remove_from_waitlist(
    State(state): State<AppState>,
    Path(name): Path<String>,
    ValidatedQuery(params): ValidatedQuery<RemoveFromWaitlistParams>,
) -> Result<Json<MessageResponse>, AppError> {
    WaitlistService::remove_from_waitlist(&state.db, &name, &params.email, &params.user_email)
        .await?;

    Ok(Json(MessageResponse {
        message: format!("Removed {} from waitlist for {}", params.email, name),
    }))
}
