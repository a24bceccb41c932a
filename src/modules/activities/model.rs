use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::modules::students::model::StudentSummary;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Activity {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub capacity: i64,
}

/// Per-activity entry of the `GET /activities` mapping. Capacity is exposed
/// under the wire name `max_participants`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityDetail {
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
    pub participants: Vec<StudentSummary>,
}

#[derive(Debug, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SignupParams {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    /// Required only when no student exists for the email yet.
    pub name: Option<String>,
    /// Required only when no student exists for the email yet.
    pub grade: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UnregisterParams {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
}

/// Terminal state of a signup: a confirmed enrollment, or a queued
/// waitlist entry because the activity was at capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupOutcome {
    Enrolled,
    Waitlisted,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct ActivityStats {
    pub name: String,
    pub participants: i64,
    pub spots_left: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub total_activities: i64,
    pub total_participants: i64,
    pub activity_stats: Vec<ActivityStats>,
}
