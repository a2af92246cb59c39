use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request payload for registering a member
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateMemberRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Full name must be between 1 and 255 characters"
    ))]
    pub full_name: String,

    #[validate(email(message = "A valid email address is required"))]
    #[validate(length(max = 255))]
    pub email: String,

    #[validate(length(max = 50))]
    pub phone: Option<String>,
}

/// Request payload for updating a member.
///
/// `clear_phone` removes the stored phone number.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateMemberRequest {
    #[validate(length(min = 1, max = 255))]
    pub full_name: Option<String>,

    #[validate(email)]
    #[validate(length(max = 255))]
    pub email: Option<String>,

    #[validate(length(max = 50))]
    pub phone: Option<String>,

    #[serde(default)]
    pub clear_phone: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_phone_defaults_to_false() {
        let update: UpdateMemberRequest =
            serde_json::from_str(r#"{"full_name":"Can Aksoy"}"#).unwrap();
        assert!(!update.clear_phone);
        assert!(update.validate().is_ok());

        let clearing: UpdateMemberRequest =
            serde_json::from_str(r#"{"clear_phone":true}"#).unwrap();
        assert!(clearing.clear_phone);
        assert!(clearing.phone.is_none());
    }
}
