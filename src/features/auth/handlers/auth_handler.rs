use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{AuthResponseDto, LoginRequestDto, RegisterRequestDto};
use crate::features::auth::services::AuthService;
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use validator::Validate;

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "Account registered successfully", body = AuthResponseDto),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    ),
    tag = "auth"
)]
pub async fn register(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<RegisterRequestDto>,
) -> Result<(StatusCode, Json<AuthResponseDto>)> {
    dto.validate()?;

    let auth_response = service.register(dto).await?;
    Ok((StatusCode::CREATED, Json(auth_response)))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = AuthResponseDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Bad credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<AuthResponseDto>> {
    dto.validate()?;

    let auth_response = service.login(dto).await?;
    Ok(Json(auth_response))
}
