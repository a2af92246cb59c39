use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request payload for creating a new fitness center
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateFitnessCenterRequest {
    #[validate(length(
        min = 1,
        max = 80,
        message = "Name must be between 1 and 80 characters"
    ))]
    pub name: String,

    #[validate(length(min = 1, max = 500, message = "Address is required"))]
    pub address: String,

    #[validate(length(max = 255))]
    pub working_hours: Option<String>,
}

/// Request payload for updating an existing fitness center.
///
/// `clear_working_hours` removes the published opening hours.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateFitnessCenterRequest {
    #[validate(length(min = 1, max = 80))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 500))]
    pub address: Option<String>,

    #[validate(length(max = 255))]
    pub working_hours: Option<String>,

    #[serde(default)]
    pub clear_working_hours: bool,
}
