use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(length(max = 50))]
    pub department: Option<String>,
    #[validate(length(max = 100))]
    pub full_name: Option<String>,
}

impl UpdateProfileRequest {
    /// Trim every field so length rules apply to what gets stored.
    pub fn normalized(self) -> Self {
        let trim = |v: Option<String>| v.map(|s| s.trim().to_string());
        Self {
            username: trim(self.username),
            email: trim(self.email),
            phone: trim(self.phone),
            department: trim(self.department),
            full_name: trim(self.full_name),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AvatarResponse {
    pub avatar_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_username_fails_after_trim() {
        let req = UpdateProfileRequest {
            username: Some("   ".into()),
            ..Default::default()
        };
        assert!(req.normalized().validate().is_err());

        let req = UpdateProfileRequest {
            username: Some(" ab ".into()),
            ..Default::default()
        };
        assert!(req.normalized().validate().is_err());
    }

    #[test]
    fn test_normalized_keeps_valid_values() {
        let req = UpdateProfileRequest {
            username: Some("  newname ".into()),
            email: Some(" me@example.com ".into()),
            ..Default::default()
        }
        .normalized();
        assert!(req.validate().is_ok());
        assert_eq!(req.username.as_deref(), Some("newname"));
        assert_eq!(req.email.as_deref(), Some("me@example.com"));
    }
}
