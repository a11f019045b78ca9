use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create routes for the categories feature
///
/// Note: these routes require a bearer token; the auth middleware is
/// attached when the protected router is assembled
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/api/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/api/categories/{id}",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorBody;
    use crate::core::middleware::{attach_error_path, auth_middleware};
    use crate::features::users::models::{Role, User};
    use crate::shared::test_helpers::{test_jwt_keys, test_pool};
    use axum::middleware::{from_fn, from_fn_with_state};
    use axum_test::TestServer;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn bearer_token() -> String {
        let user = User {
            id: Uuid::new_v4(),
            email: "test.user@example.com".to_string(),
            password_hash: "unused".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            role: Role::User,
            enabled: true,
            created_at: Utc::now(),
        };
        test_jwt_keys().sign(&user).expect("sign test token")
    }

    fn test_app() -> TestServer {
        let service = Arc::new(CategoryService::new(test_pool()));
        let keys = Arc::new(test_jwt_keys());
        let app = routes(service)
            .route_layer(from_fn_with_state(keys, auth_middleware))
            .layer(from_fn(attach_error_path));
        TestServer::new(app).expect("test server")
    }

    #[tokio::test]
    async fn rejects_missing_authorization_header() {
        let server = test_app();
        let response = server.get("/api/categories").await;

        response.assert_status_unauthorized();
        let body = response.json::<ErrorBody>();
        assert_eq!(body.error_code, "UNAUTHORIZED");
        assert_eq!(body.message, "Missing authorization header");
        assert_eq!(body.path, "/api/categories");
    }

    #[tokio::test]
    async fn rejects_non_bearer_authorization_header() {
        let server = test_app();
        let response = server
            .get("/api/categories")
            .add_header("authorization", "Basic dXNlcjpwYXNz")
            .await;

        response.assert_status_unauthorized();
        let body = response.json::<ErrorBody>();
        assert_eq!(body.message, "Invalid authorization header format");
    }

    #[tokio::test]
    async fn rejects_tampered_token() {
        let server = test_app();
        let response = server
            .get("/api/categories")
            .authorization_bearer("not-a-real-token")
            .await;

        response.assert_status_unauthorized();
        let body = response.json::<ErrorBody>();
        assert_eq!(body.error_code, "UNAUTHORIZED");
        assert_eq!(body.message, "Invalid or expired token");
    }

    #[tokio::test]
    async fn rejects_malformed_uuid_path() {
        let server = test_app();
        let response = server
            .get("/api/categories/not-a-uuid")
            .authorization_bearer(&bearer_token())
            .await;

        response.assert_status_bad_request();
        let body = response.json::<ErrorBody>();
        assert_eq!(body.error_code, "INVALID_PARAMETER_FORMAT");
        assert_eq!(
            body.message,
            "Invalid UUID format for parameter 'id': 'not-a-uuid'"
        );
    }

    #[tokio::test]
    async fn rejects_invalid_sort_direction_with_field_error() {
        let server = test_app();
        let response = server
            .get("/api/categories")
            .add_query_param("sortDir", "sideways")
            .authorization_bearer(&bearer_token())
            .await;

        response.assert_status_bad_request();
        let body = response.json::<ErrorBody>();
        assert_eq!(body.error_code, "VALIDATION_ERROR");

        let field_errors = body.field_errors.expect("field errors");
        assert_eq!(field_errors[0].field, "sortDir");
        assert_eq!(field_errors[0].message, "Sort direction must be 'asc' or 'desc'");
    }

    #[tokio::test]
    async fn rejects_out_of_range_paging() {
        let server = test_app();

        let response = server
            .get("/api/categories")
            .add_query_param("page", "-1")
            .authorization_bearer(&bearer_token())
            .await;
        response.assert_status_bad_request();
        assert_eq!(
            response.json::<ErrorBody>().error_code,
            "VALIDATION_ERROR"
        );

        let response = server
            .get("/api/categories")
            .add_query_param("size", "101")
            .authorization_bearer(&bearer_token())
            .await;
        response.assert_status_bad_request();
        assert_eq!(
            response.json::<ErrorBody>().error_code,
            "VALIDATION_ERROR"
        );
    }

    #[tokio::test]
    async fn rejects_page_number_that_overflows_the_parameter_type() {
        let server = test_app();
        let response = server
            .get("/api/categories")
            .add_query_param("page", "9223372036854775807")
            .authorization_bearer(&bearer_token())
            .await;

        response.assert_status_bad_request();
        let body = response.json::<ErrorBody>();
        assert_eq!(body.error_code, "INVALID_PARAMETER_FORMAT");
        assert_eq!(body.path, "/api/categories");
    }

    #[tokio::test]
    async fn rejects_blank_category_name() {
        let server = test_app();
        let response = server
            .post("/api/categories")
            .authorization_bearer(&bearer_token())
            .json(&json!({ "name": "   " }))
            .await;

        response.assert_status_bad_request();
        let body = response.json::<ErrorBody>();
        assert_eq!(body.error_code, "VALIDATION_ERROR");

        let field_errors = body.field_errors.expect("field errors");
        assert_eq!(field_errors[0].field, "name");
        assert_eq!(field_errors[0].message, "Category name cannot be blank");
    }
}
