use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Authorization level. Stored as lowercase TEXT in the `students.role`
/// column; `student` is the default for rows created through signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Admin,
}

impl Role {
    /// Waitlist management is staff-only.
    pub fn can_manage_waitlist(self) -> bool {
        matches!(self, Role::Teacher | Role::Admin)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub grade: String,
    pub role: Role,
}

/// The `{email, name, grade}` shape used wherever people are listed:
/// activity rosters, waitlists, and the upsert response.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentSummary {
    pub email: String,
    pub name: String,
    pub grade: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentProfile {
    pub email: String,
    pub name: String,
    pub grade: String,
    /// Confirmed enrollments only; waitlisted activities are excluded.
    pub activities: Vec<EnrolledActivity>,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct EnrolledActivity {
    pub name: String,
    pub description: String,
    pub schedule: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UpsertStudentParams {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "grade must not be empty"))]
    pub grade: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpsertStudentResponse {
    pub message: String,
    pub profile: StudentSummary,
}
