use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Request payload for creating a new service
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateServiceRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(range(
        min = 1,
        max = 1440,
        message = "Duration must be between 1 and 1440 minutes"
    ))]
    pub duration_minutes: i32,

    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,

    pub fitness_center_id: Uuid,
}

/// Request payload for updating an existing service
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateServiceRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(range(min = 1, max = 1440))]
    pub duration_minutes: Option<i32>,

    #[validate(custom(function = "validate_price"))]
    pub price: Option<Decimal>,

    pub fitness_center_id: Option<Uuid>,
}

/// Query parameters for listing services
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ServiceFilter {
    /// Only services offered by this fitness center
    pub fitness_center_id: Option<Uuid>,
}

fn validate_price(price: &Decimal) -> Result<(), validator::ValidationError> {
    if price.is_sign_negative() || *price > Decimal::new(10_000, 0) {
        let mut error = validator::ValidationError::new("invalid_price");
        error.message = Some("Price must be between 0 and 10000".into());
        return Err(error);
    }
    Ok(())
}
