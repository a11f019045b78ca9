use axum::{
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;

/// JSON body extractor that maps rejections onto the shared error body
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => {
                let message = match rejection {
                    JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err),
                    JsonRejection::JsonSyntaxError(err) => format!("Invalid JSON syntax: {}", err),
                    JsonRejection::MissingJsonContentType(err) => {
                        format!("Missing JSON content type: {}", err)
                    }
                    other => format!("Failed to parse JSON body: {}", other.body_text()),
                };
                Err(AppError::InvalidData(message))
            }
        }
    }
}

/// Query string extractor that maps rejections onto the shared error body
pub struct AppQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(AppError::InvalidParameter(format!(
                "Invalid query parameter: {}",
                rejection.body_text()
            ))),
        }
    }
}

/// Path extractor for `{id}` segments. Non-UUID input is reported as a
/// parameter format problem rather than a routing miss.
pub struct UuidParam(pub Uuid);

impl<S> FromRequestParts<S> for UuidParam
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|err| {
                AppError::InvalidParameter(format!("Invalid path parameter: {}", err.body_text()))
            })?;

        raw.parse::<Uuid>().map(UuidParam).map_err(|_| {
            AppError::InvalidParameter(format!(
                "Invalid UUID format for parameter 'id': '{}'",
                raw
            ))
        })
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::with_authenticated_user;
    use axum::{routing::get, Json, Router};
    use axum_test::TestServer;

    async fn whoami(user: AuthenticatedUser) -> Json<String> {
        Json(user.email)
    }

    #[tokio::test]
    async fn missing_user_extension_is_unauthorized() {
        let app = Router::new().route("/whoami", get(whoami));
        let server = TestServer::new(app).expect("test server");

        let response = server.get("/whoami").await;
        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn injected_user_is_extracted() {
        let app = with_authenticated_user(Router::new().route("/whoami", get(whoami)));
        let server = TestServer::new(app).expect("test server");

        let response = server.get("/whoami").await;
        response.assert_status_ok();
        assert_eq!(response.json::<String>(), "test.user@example.com");
    }
}
