use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::users::models::User;
use crate::shared::constants::TOKEN_TYPE_BEARER;

/// Request DTO for account registration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequestDto {
    #[validate(length(min = 1, message = "First name is required"))]
    #[schema(example = "Jane")]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    #[schema(example = "Doe")]
    pub last_name: String,

    #[validate(email(message = "Email should be valid"))]
    #[schema(example = "jane.doe@example.com")]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Request DTO for credential login
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequestDto {
    #[validate(email(message = "Email should be valid"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response DTO for authentication (register/login)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseDto {
    /// Signed JWT access token
    pub token: String,
    /// Token type (always "Bearer")
    #[serde(rename = "type")]
    #[schema(example = "Bearer")]
    pub token_type: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl AuthResponseDto {
    pub fn new(token: String, user: &User) -> Self {
        Self {
            token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;

    fn valid_register() -> RegisterRequestDto {
        RegisterRequestDto {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: SafeEmail().fake(),
            password: "s3cret-pass".to_string(),
        }
    }

    #[test]
    fn register_accepts_valid_payload() {
        assert!(valid_register().validate().is_ok());
    }

    #[test]
    fn register_rejects_short_password() {
        let mut dto = valid_register();
        dto.password = "short".to_string();

        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn register_rejects_invalid_email() {
        let mut dto = valid_register();
        dto.email = "not-an-email".to_string();

        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn register_rejects_blank_names() {
        let mut dto = valid_register();
        dto.first_name = String::new();
        dto.last_name = String::new();

        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("first_name"));
        assert!(fields.contains_key("last_name"));
    }

    #[test]
    fn login_requires_email_and_password() {
        let dto = LoginRequestDto {
            email: String::new(),
            password: String::new(),
        };

        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn auth_response_reports_bearer_type() {
        use crate::features::users::models::Role;
        use chrono::Utc;
        use uuid::Uuid;

        let user = User {
            id: Uuid::new_v4(),
            email: "jane.doe@example.com".to_string(),
            password_hash: "unused".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            role: Role::User,
            enabled: true,
            created_at: Utc::now(),
        };

        let response = AuthResponseDto::new("tok".to_string(), &user);
        assert_eq!(response.token_type, "Bearer");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "Bearer");
        assert_eq!(json["firstName"], "Jane");
    }
}
