use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;
use axum::{routing::post, Router};
use std::sync::Arc;

/// Create routes for the auth feature
///
/// Note: registration and login are public (no authentication required)
pub fn routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorBody;
    use crate::core::middleware::attach_error_path;
    use crate::features::auth::token::JwtKeys;
    use crate::features::users::UserService;
    use crate::shared::test_helpers::{test_auth_config, test_pool};
    use axum::middleware::from_fn;
    use axum_test::TestServer;
    use serde_json::json;

    fn test_app() -> TestServer {
        let users = Arc::new(UserService::new(test_pool()));
        let keys = Arc::new(JwtKeys::from_config(&test_auth_config()));
        let service = Arc::new(AuthService::new(users, keys));
        let app = routes(service).layer(from_fn(attach_error_path));
        TestServer::new(app).expect("test server")
    }

    #[tokio::test]
    async fn register_rejects_short_password_with_field_error() {
        let server = test_app();
        let response = server
            .post("/api/auth/register")
            .json(&json!({
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "jane.doe@example.com",
                "password": "short"
            }))
            .await;

        response.assert_status_bad_request();
        let body = response.json::<ErrorBody>();
        assert_eq!(body.error_code, "VALIDATION_ERROR");
        assert_eq!(body.path, "/api/auth/register");

        let field_errors = body.field_errors.expect("field errors");
        assert_eq!(field_errors.len(), 1);
        assert_eq!(field_errors[0].field, "password");
        assert_eq!(
            field_errors[0].message,
            "Password must be at least 6 characters"
        );
    }

    #[tokio::test]
    async fn register_rejects_malformed_json() {
        let server = test_app();
        let response = server
            .post("/api/auth/register")
            .content_type("application/json")
            .text(r#"{"firstName": }"#)
            .await;

        response.assert_status_bad_request();
        let body = response.json::<ErrorBody>();
        assert_eq!(body.error_code, "INVALID_DATA");
    }

    #[tokio::test]
    async fn login_rejects_blank_credentials() {
        let server = test_app();
        let response = server
            .post("/api/auth/login")
            .json(&json!({ "email": "", "password": "" }))
            .await;

        response.assert_status_bad_request();
        let body = response.json::<ErrorBody>();
        assert_eq!(body.error_code, "VALIDATION_ERROR");
        assert!(body.field_errors.is_some());
    }
}
