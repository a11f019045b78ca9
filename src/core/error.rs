use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Timestamp format used in error bodies (dd-MM-yyyy HH:mm:ss)
const ERROR_TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    ResourceInUse(String),

    #[error("{0}")]
    InvalidData(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Validation failed for one or more fields")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{0}")]
    InvalidParameter(String),

    #[error("Bad credentials")]
    BadCredentials,

    #[error("{0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Lookup failure for a named resource
    pub fn not_found(resource: &str, identifier: impl std::fmt::Display) -> Self {
        AppError::NotFound(format!(
            "Resource {} not found with identifier {}",
            resource, identifier
        ))
    }

    /// Uniqueness violation for a named resource field
    pub fn duplicate(resource: &str, field: &str, value: impl std::fmt::Display) -> Self {
        AppError::Duplicate(format!(
            "Resource {} already exists with {}: {}",
            resource, field, value
        ))
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Database(_) | AppError::Internal(_) => "INTERNAL_SERVER_ERROR",
            AppError::NotFound(_) => "RESOURCE_NOT_FOUND",
            AppError::Duplicate(_) => "DUPLICATE_RESOURCE",
            AppError::ResourceInUse(_) => "RESOURCE_IN_USE",
            AppError::InvalidData(_) => "INVALID_DATA",
            AppError::InvalidArgument(_) => "INVALID_ARGUMENT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InvalidParameter(_) => "INVALID_PARAMETER_FORMAT",
            AppError::BadCredentials => "BAD_CREDENTIALS",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Duplicate(_) | AppError::ResourceInUse(_) => StatusCode::CONFLICT,
            AppError::InvalidData(_)
            | AppError::InvalidArgument(_)
            | AppError::Validation(_)
            | AppError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            AppError::BadCredentials | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

/// Structured error body returned by every error response.
///
/// `path` is filled in by the response middleware, which knows the request
/// URI; see `core::middleware::attach_error_path`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_code: String,
    pub message: String,
    pub path: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<Vec<FieldError>>,
}

/// Per-field detail attached to validation failures
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    pub rejected_value: serde_json::Value,
    pub message: String,
}

/// Converts a struct field name to its wire name (snake_case -> camelCase),
/// matching the casing request bodies use.
fn wire_field_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut capitalize = false;
    for ch in field.chars() {
        if ch == '_' {
            capitalize = true;
        } else if capitalize {
            out.extend(ch.to_uppercase());
            capitalize = false;
        } else {
            out.push(ch);
        }
    }
    out
}

fn collect_field_errors(errors: &validator::ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(|err| FieldError {
                field: wire_field_name(field),
                rejected_value: err
                    .params
                    .get("value")
                    .cloned()
                    .unwrap_or(serde_json::Value::Null),
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string()),
            })
        })
        .collect();

    // HashMap iteration order is unstable; keep responses deterministic
    fields.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));
    fields
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "An unexpected error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An unexpected error occurred".to_string()
            }
            other => other.to_string(),
        };

        let field_errors = match &self {
            AppError::Validation(errors) => Some(collect_field_errors(errors)),
            _ => None,
        };

        let body = ErrorBody {
            error_code: error_code.to_string(),
            message,
            path: String::new(),
            timestamp: Utc::now().format(ERROR_TIMESTAMP_FORMAT).to_string(),
            field_errors,
        };

        let mut response = (status, Json(body.clone())).into_response();
        // Stashed for the path-filling middleware
        response.extensions_mut().insert(body);
        response
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Debug, Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(range(min = 1, message = "Count must be at least 1"))]
        count: i64,
    }

    fn body_of(error: AppError) -> (StatusCode, ErrorBody) {
        let response = error.into_response();
        let status = response.status();
        let body = response
            .extensions()
            .get::<ErrorBody>()
            .cloned()
            .expect("error responses carry their body in extensions");
        (status, body)
    }

    #[test]
    fn not_found_maps_to_404_with_resource_message() {
        let (status, body) = body_of(AppError::not_found("Category", "abc-123"));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error_code, "RESOURCE_NOT_FOUND");
        assert_eq!(
            body.message,
            "Resource Category not found with identifier abc-123"
        );
        assert!(body.field_errors.is_none());
    }

    #[test]
    fn duplicate_maps_to_409() {
        let (status, body) = body_of(AppError::duplicate("User", "email", "j@x.com"));
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.error_code, "DUPLICATE_RESOURCE");
        assert_eq!(
            body.message,
            "Resource User already exists with email: j@x.com"
        );
    }

    #[test]
    fn bad_credentials_maps_to_401() {
        let (status, body) = body_of(AppError::BadCredentials);
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.error_code, "BAD_CREDENTIALS");
        assert_eq!(body.message, "Bad credentials");
    }

    #[test]
    fn internal_error_suppresses_cause_from_client() {
        let (status, body) = body_of(AppError::Internal("connection pool exhausted".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error_code, "INTERNAL_SERVER_ERROR");
        assert_eq!(body.message, "An unexpected error occurred");
    }

    #[test]
    fn validation_error_carries_field_errors() {
        let probe = Probe {
            name: String::new(),
            count: 0,
        };
        let errors = probe.validate().unwrap_err();
        let (status, body) = body_of(AppError::Validation(errors));

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error_code, "VALIDATION_ERROR");
        assert_eq!(body.message, "Validation failed for one or more fields");

        let field_errors = body.field_errors.expect("field errors present");
        assert_eq!(field_errors.len(), 2);
        assert_eq!(field_errors[0].field, "count");
        assert_eq!(field_errors[0].message, "Count must be at least 1");
        assert_eq!(field_errors[0].rejected_value, serde_json::json!(0));
        assert_eq!(field_errors[1].field, "name");
        assert_eq!(field_errors[1].message, "Name is required");
    }

    #[test]
    fn field_errors_use_wire_casing() {
        #[derive(Debug, Validate)]
        struct Wire {
            #[validate(length(min = 1, message = "First name is required"))]
            first_name: String,
        }

        let errors = Wire {
            first_name: String::new(),
        }
        .validate()
        .unwrap_err();
        let (_, body) = body_of(AppError::Validation(errors));

        let field_errors = body.field_errors.expect("field errors present");
        assert_eq!(field_errors[0].field, "firstName");
    }

    #[test]
    fn invalid_parameter_maps_to_400() {
        let (status, body) = body_of(AppError::InvalidParameter(
            "Invalid UUID format for parameter 'id': 'oops'".into(),
        ));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error_code, "INVALID_PARAMETER_FORMAT");
        assert_eq!(
            body.message,
            "Invalid UUID format for parameter 'id': 'oops'"
        );
    }
}
