use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RemoveFromWaitlistParams {
    /// Student to remove from the waitlist.
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    /// Requester performing the removal; must hold a staff role.
    #[validate(email(message = "user_email must be a valid email address"))]
    pub user_email: String,
}
