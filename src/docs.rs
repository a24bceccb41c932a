use utoipa::OpenApi;

use crate::modules::activities::controller::ErrorResponse;
use crate::modules::activities::model::{
    ActivityDetail, ActivityStats, DashboardResponse, MessageResponse, SignupParams,
    UnregisterParams,
};
use crate::modules::students::model::{
    EnrolledActivity, Role, StudentProfile, StudentSummary, UpsertStudentParams,
    UpsertStudentResponse,
};
use crate::modules::waitlist::model::RemoveFromWaitlistParams;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::activities::controller::get_activities,
        crate::modules::activities::controller::get_dashboard,
        crate::modules::activities::controller::signup_for_activity,
        crate::modules::activities::controller::unregister_from_activity,
        crate::modules::waitlist::controller::get_activity_waitlist,
        crate::modules::waitlist::controller::remove_from_waitlist,
        crate::modules::students::controller::get_student_profile,
        crate::modules::students::controller::upsert_student,
    ),
    components(
        schemas(
            ActivityDetail,
            ActivityStats,
            DashboardResponse,
            MessageResponse,
            SignupParams,
            UnregisterParams,
            RemoveFromWaitlistParams,
            Role,
            StudentSummary,
            StudentProfile,
            EnrolledActivity,
            UpsertStudentParams,
            UpsertStudentResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Activities", description = "Activity listing, signup and unregistration"),
        (name = "Waitlist", description = "Waitlist inspection and staff management"),
        (name = "Students", description = "Student profiles")
    ),
    info(
        title = "Mergington High School API",
        version = "0.1.0",
        description = "API for viewing and signing up for extracurricular activities",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
